// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Decimal amounts are carried as strings on the wire so callers keep exact
//! precision; statuses are carried as their snake_case strings. These DTOs
//! are distinct from domain types and represent the API contract.

use serde::{Deserialize, Serialize};

/// One line item as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInfo {
    /// Free-text description of the material or service.
    pub description: String,
    /// Short unit-of-measure code.
    pub unit: String,
    /// Requested quantity as a decimal string.
    pub quantity: String,
    /// Estimated unit price as a decimal string.
    pub unit_price: String,
}

/// A purchase request as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequestInfo {
    /// The request id.
    pub request_id: i64,
    /// Short title of the ask.
    pub title: String,
    /// Longer free-text description.
    pub description: String,
    /// The requesting department reference.
    pub department: String,
    /// The creator's user id.
    pub created_by: i64,
    /// Current status as its wire string.
    pub status: String,
    /// Ordered line items.
    pub line_items: Vec<LineItemInfo>,
    /// Σ quantity × unit price over the current line items.
    pub estimated_total: String,
    /// Total recorded on approval, if approved.
    pub approved_total: Option<String>,
    /// The bidding process this request was folded into, if any.
    pub bidding_process_id: Option<i64>,
}

/// API request to consolidate a set of purchase requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidateRequest {
    /// Ids of the purchase requests to consolidate. Duplicates are ignored.
    pub request_ids: Vec<i64>,
    /// Title for the new bidding process.
    pub title: String,
    /// Optional free-text observations.
    pub observations: Option<String>,
}

/// One consolidated item as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedItemInfo {
    /// Description as first encountered during the merge.
    pub description: String,
    /// Unit of measure as first encountered during the merge.
    pub unit: String,
    /// Summed quantity as a decimal string.
    pub total_quantity: String,
    /// Representative unit price as a decimal string.
    pub unit_price: String,
    /// Ascending, deduplicated ids of the contributing purchase requests.
    pub source_request_ids: Vec<i64>,
}

/// API response for a successful consolidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidateResponse {
    /// The created bidding process id.
    pub process_id: i64,
    /// The consolidated items in first-seen group order.
    pub items: Vec<ConsolidatedItemInfo>,
    /// Number of distinct consolidated items.
    pub unique_item_count: usize,
    /// Sum of total quantities across all consolidated items.
    pub total_quantity: String,
    /// Σ total quantity × representative unit price.
    pub total_estimated_value: String,
    /// Number of distinct source purchase requests.
    pub source_request_count: usize,
    /// A success message.
    pub message: String,
}

/// API request to transition a purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequestRequest {
    /// The purchase request to transition.
    pub request_id: i64,
    /// The target status as its wire string.
    pub target_status: String,
    /// Optional free-text comment for the history entry.
    pub comment: Option<String>,
}

/// API response for a successful purchase request transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequestResponse {
    /// The purchase request id.
    pub request_id: i64,
    /// The status before the transition.
    pub previous_status: String,
    /// The status after the transition.
    pub new_status: String,
    /// The total recorded when the transition was an approval.
    pub approved_total: Option<String>,
    /// A success message.
    pub message: String,
}

/// API request to transition a bidding process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionProcessRequest {
    /// The bidding process to transition.
    pub process_id: i64,
    /// The target status as its wire string.
    pub target_status: String,
    /// Optional free-text comment for the history entry.
    pub comment: Option<String>,
}

/// API response for a successful bidding process transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionProcessResponse {
    /// The bidding process id.
    pub process_id: i64,
    /// The status before the transition.
    pub previous_status: String,
    /// The status after the transition.
    pub new_status: String,
    /// A success message.
    pub message: String,
}

/// A bidding process as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiddingProcessInfo {
    /// The process id.
    pub process_id: i64,
    /// Short title of the process.
    pub title: String,
    /// Current status as its wire string.
    pub status: String,
    /// The consolidated items in first-seen group order.
    pub items: Vec<ConsolidatedItemInfo>,
    /// Optional free-text observations.
    pub observations: Option<String>,
    /// The creator's user id.
    pub created_by: i64,
    /// Ids of the source purchase requests, ascending.
    pub source_request_ids: Vec<i64>,
}

/// API request to update a bidding process's observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateObservationsRequest {
    /// The bidding process to update.
    pub process_id: i64,
    /// The new observations text, or `None` to clear it.
    pub observations: Option<String>,
}

/// API response for a successful observations update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateObservationsResponse {
    /// The bidding process id.
    pub process_id: i64,
    /// A success message.
    pub message: String,
}

/// One status history entry as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    /// The status before the transition.
    pub previous_status: String,
    /// The status after the transition.
    pub new_status: String,
    /// The user id of the actor who performed the transition.
    pub actor_id: i64,
    /// The role label of the actor.
    pub actor_role: String,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// RFC 3339 timestamp of when the transition was recorded.
    pub recorded_at: String,
}

/// API response listing an aggregate's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryResponse {
    /// The aggregate kind as its wire string.
    pub aggregate_kind: String,
    /// The aggregate's id.
    pub aggregate_id: i64,
    /// The entries in recording order.
    pub entries: Vec<HistoryEntryInfo>,
}

/// API response listing the transitions an actor may perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTransitionsResponse {
    /// The aggregate's current status as its wire string.
    pub current_status: String,
    /// The target statuses the actor may move the aggregate to.
    pub available: Vec<String>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consolidation planning: eligibility validation and the line-item merge.

use crate::error::CoreError;
use bidflow_domain::{
    BiddingProcess, ConsolidatedItem, DomainError, ItemKey, PurchaseRequest, RequestStatus,
    validate_observations, validate_title,
};
use bidflow_history::{Actor, AggregateKind, HistoryEntry};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// The caller's intent to consolidate a set of purchase requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationInput {
    /// Ids of the purchase requests to consolidate. Duplicates are ignored.
    pub request_ids: Vec<i64>,
    /// Title for the new bidding process.
    pub title: String,
    /// Optional free-text observations.
    pub observations: Option<String>,
}

/// The status flip to apply to one source purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRelink {
    /// The purchase request id.
    pub request_id: i64,
    /// The status the request must still hold at commit time.
    pub previous_status: RequestStatus,
    /// The status to move the request to. Always `in_bidding_process`.
    pub new_status: RequestStatus,
    /// The history entry recording the flip.
    pub entry: HistoryEntry,
}

/// Aggregate figures for the consolidation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationSummary {
    /// Number of distinct consolidated items.
    pub unique_item_count: usize,
    /// Sum of total quantities across all consolidated items.
    pub total_quantity: Decimal,
    /// Σ total quantity × representative unit price.
    pub total_estimated_value: Decimal,
    /// Number of distinct source purchase requests.
    pub source_request_count: usize,
}

/// The complete set of effects a consolidation commit must apply.
///
/// Either everything in the plan is persisted or nothing is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationPlan {
    /// The bidding process to create, in `draft`.
    pub process: BiddingProcess,
    /// The status flip and history entry for every source request,
    /// ascending by request id.
    pub relinks: Vec<RequestRelink>,
    /// Aggregate figures over the consolidated items.
    pub summary: ConsolidationSummary,
}

/// Validates a consolidation selection and computes the merge.
///
/// `requests` must contain the loaded purchase request for every id in
/// `input.request_ids`. The function is pure: nothing is written, and
/// re-running it on the same input yields the identical plan.
///
/// # Arguments
///
/// * `requests` - The loaded source purchase requests
/// * `input` - The consolidation intent (ids, title, observations)
/// * `actor` - The actor performing the consolidation
/// * `recorded_at` - RFC 3339 timestamp for the history entries
///
/// # Errors
///
/// Returns an error if:
/// - The selection is empty
/// - The title or observations fail validation
/// - Any id has no matching loaded request
/// - Any source request is not in `price_research_completed`
pub fn plan_consolidation(
    requests: &[PurchaseRequest],
    input: &ConsolidationInput,
    actor: &Actor,
    recorded_at: &str,
) -> Result<ConsolidationPlan, CoreError> {
    validate_title(&input.title)?;
    validate_observations(input.observations.as_deref())?;

    if input.request_ids.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::EmptySelection));
    }

    // Ascending, deduplicated selection; stable iteration order for the merge.
    let mut selected: BTreeMap<i64, &PurchaseRequest> = BTreeMap::new();
    for &request_id in &input.request_ids {
        let request: &PurchaseRequest = requests
            .iter()
            .find(|r| r.id == Some(request_id))
            .ok_or(CoreError::DomainViolation(DomainError::RequestNotFound(
                request_id,
            )))?;
        selected.insert(request_id, request);
    }

    for (&request_id, request) in &selected {
        if request.status != RequestStatus::PriceResearchCompleted {
            return Err(CoreError::DomainViolation(
                DomainError::RequestNotEligible {
                    request_id,
                    status: request.status.as_str().to_string(),
                },
            ));
        }
    }

    let items: Vec<ConsolidatedItem> = merge_line_items(&selected);

    let summary = ConsolidationSummary {
        unique_item_count: items.len(),
        total_quantity: items.iter().map(|i| i.total_quantity).sum(),
        total_estimated_value: items.iter().map(ConsolidatedItem::estimated_value).sum(),
        source_request_count: selected.len(),
    };

    let relinks: Vec<RequestRelink> = selected
        .keys()
        .map(|&request_id| RequestRelink {
            request_id,
            previous_status: RequestStatus::PriceResearchCompleted,
            new_status: RequestStatus::InBiddingProcess,
            entry: HistoryEntry::new(
                AggregateKind::PurchaseRequest,
                request_id,
                RequestStatus::PriceResearchCompleted.as_str().to_string(),
                RequestStatus::InBiddingProcess.as_str().to_string(),
                actor.clone(),
                Some(format!("Consolidated into bidding process '{}'", input.title)),
                recorded_at.to_string(),
            ),
        })
        .collect();

    let process = BiddingProcess::new(
        input.title.clone(),
        items,
        input.observations.clone(),
        actor.id,
    );

    Ok(ConsolidationPlan {
        process,
        relinks,
        summary,
    })
}

/// Merges the line items of the selected requests into consolidated items.
///
/// Iteration order is ascending request id, then original line-item order.
/// Items group by their normalized (description, unit) key; the group keeps
/// the description, unit, and unit price of its first-encountered line item
/// (later differing prices never override), sums quantities, and records
/// each contributing request id once, ascending. Output preserves
/// first-seen group order.
fn merge_line_items(selected: &BTreeMap<i64, &PurchaseRequest>) -> Vec<ConsolidatedItem> {
    let mut items: Vec<ConsolidatedItem> = Vec::new();
    let mut index: HashMap<ItemKey, usize> = HashMap::new();

    for (&request_id, request) in selected {
        for line_item in &request.line_items {
            let key: ItemKey = line_item.key();
            if let Some(&position) = index.get(&key) {
                let item: &mut ConsolidatedItem = &mut items[position];
                item.total_quantity += line_item.quantity;
                // Contributions arrive in ascending request order, so
                // checking the tail is enough to deduplicate.
                if item.source_request_ids.last() != Some(&request_id) {
                    item.source_request_ids.push(request_id);
                }
            } else {
                index.insert(key, items.len());
                items.push(ConsolidatedItem {
                    description: line_item.description.clone(),
                    unit: line_item.unit.clone(),
                    total_quantity: line_item.quantity,
                    unit_price: line_item.unit_price,
                    source_request_ids: vec![request_id],
                });
            }
        }
    }

    items
}

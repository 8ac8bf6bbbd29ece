// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::item_key::ItemKey;
use crate::process_status::ProcessStatus;
use crate::request_status::RequestStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a purchase request.
///
/// Line items are immutable once the parent request leaves `draft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text description of the material or service.
    pub description: String,
    /// Short unit-of-measure code (e.g., "box", "unit").
    pub unit: String,
    /// Requested quantity. Strictly positive.
    pub quantity: Decimal,
    /// Estimated unit price at currency scale. Non-negative.
    pub unit_price: Decimal,
}

impl LineItem {
    /// Creates a new `LineItem`.
    ///
    /// Field constraints are checked by `validation::validate_line_item`,
    /// not at construction time.
    #[must_use]
    pub const fn new(
        description: String,
        unit: String,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            description,
            unit,
            quantity,
            unit_price,
        }
    }

    /// Returns the grouping key used by consolidation.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.description, &self.unit)
    }

    /// Returns quantity × unit price for this line.
    #[must_use]
    pub fn estimated_value(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// One department's procurement ask.
///
/// `id` is `None` until the request has been persisted, mirroring the
/// row-id assignment done by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Canonical row id. `None` before persistence.
    pub id: Option<i64>,
    /// Short title of the ask.
    pub title: String,
    /// Longer free-text description.
    pub description: String,
    /// The requesting department reference.
    pub department: String,
    /// The creator's user id.
    pub created_by: i64,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// Ordered line items (1..N).
    pub line_items: Vec<LineItem>,
    /// Total recorded on approval. `None` until approved.
    pub approved_total: Option<Decimal>,
    /// The bidding process this request was folded into, if any.
    pub bidding_process_id: Option<i64>,
}

impl PurchaseRequest {
    /// Creates a new `PurchaseRequest` in `draft`, without a persisted id.
    #[must_use]
    pub const fn new(
        title: String,
        description: String,
        department: String,
        created_by: i64,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id: None,
            title,
            description,
            department,
            created_by,
            status: RequestStatus::Draft,
            line_items,
            approved_total: None,
            bidding_process_id: None,
        }
    }

    /// Creates a `PurchaseRequest` with an existing persisted id.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        id: i64,
        title: String,
        description: String,
        department: String,
        created_by: i64,
        status: RequestStatus,
        line_items: Vec<LineItem>,
        approved_total: Option<Decimal>,
        bidding_process_id: Option<i64>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            description,
            department,
            created_by,
            status,
            line_items,
            approved_total,
            bidding_process_id,
        }
    }

    /// Returns the estimated total, derived from the current line items.
    ///
    /// Always Σ quantity × unit price; recomputed on every call so the
    /// invariant cannot drift from the item list.
    #[must_use]
    pub fn estimated_total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::estimated_value).sum()
    }
}

/// A deduplicated item inside a bidding process.
///
/// Value object owned by its parent process; never persisted independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedItem {
    /// Description as first encountered during the merge.
    pub description: String,
    /// Unit of measure as first encountered during the merge.
    pub unit: String,
    /// Sum of requested quantities across all contributing line items.
    pub total_quantity: Decimal,
    /// Unit price of the first-encountered contributing line item.
    /// Later contributions never override it.
    pub unit_price: Decimal,
    /// Ascending, deduplicated ids of the contributing purchase requests.
    pub source_request_ids: Vec<i64>,
}

impl ConsolidatedItem {
    /// Returns the grouping key this item was merged under.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.description, &self.unit)
    }

    /// Returns total quantity × representative unit price.
    #[must_use]
    pub fn estimated_value(&self) -> Decimal {
        self.total_quantity * self.unit_price
    }
}

/// The result of consolidating a set of purchase requests.
///
/// Created atomically by the consolidation engine, never field-by-field;
/// only status and observations may change afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiddingProcess {
    /// Canonical row id. `None` before persistence.
    pub id: Option<i64>,
    /// Short title of the process.
    pub title: String,
    /// Current lifecycle status.
    pub status: ProcessStatus,
    /// Consolidated items in first-seen group order.
    pub items: Vec<ConsolidatedItem>,
    /// Optional free-text observations.
    pub observations: Option<String>,
    /// The creator's user id.
    pub created_by: i64,
}

impl BiddingProcess {
    /// Creates a new `BiddingProcess` in `draft`, without a persisted id.
    #[must_use]
    pub const fn new(
        title: String,
        items: Vec<ConsolidatedItem>,
        observations: Option<String>,
        created_by: i64,
    ) -> Self {
        Self {
            id: None,
            title,
            status: ProcessStatus::Draft,
            items,
            observations,
            created_by,
        }
    }

    /// Creates a `BiddingProcess` with an existing persisted id.
    #[must_use]
    pub const fn with_id(
        id: i64,
        title: String,
        status: ProcessStatus,
        items: Vec<ConsolidatedItem>,
        observations: Option<String>,
        created_by: i64,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            status,
            items,
            observations,
            created_by,
        }
    }

    /// Returns the total quantity across all consolidated items.
    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        self.items.iter().map(|i| i.total_quantity).sum()
    }

    /// Returns the total estimated value across all consolidated items.
    #[must_use]
    pub fn total_estimated_value(&self) -> Decimal {
        self.items.iter().map(ConsolidatedItem::estimated_value).sum()
    }
}

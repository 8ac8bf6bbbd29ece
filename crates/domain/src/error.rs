// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Title is empty or otherwise invalid.
    InvalidTitle(String),
    /// Observations text is invalid.
    InvalidObservations(String),
    /// Line item description is empty or invalid.
    InvalidItemDescription(String),
    /// Line item unit of measure is empty or invalid.
    InvalidUnitOfMeasure(String),
    /// Requested quantity must be strictly positive.
    InvalidQuantity {
        /// The offending quantity value.
        quantity: Decimal,
    },
    /// Estimated unit price must be non-negative.
    InvalidUnitPrice {
        /// The offending price value.
        price: Decimal,
    },
    /// A purchase request must own at least one line item.
    EmptyLineItems,
    /// The consolidation selection contained no purchase request ids.
    EmptySelection,
    /// Purchase request status string is not recognized.
    InvalidRequestStatus(String),
    /// Bidding process status string is not recognized.
    InvalidProcessStatus(String),
    /// Aggregate kind string is not recognized.
    InvalidAggregateKind(String),
    /// Purchase request transition not permitted by the lifecycle table.
    IllegalRequestTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// The statuses legally reachable from `from`.
        allowed: Vec<String>,
    },
    /// Bidding process transition not permitted by the lifecycle table.
    IllegalProcessTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// The statuses legally reachable from `from`.
        allowed: Vec<String>,
    },
    /// Purchase request is not eligible for consolidation.
    RequestNotEligible {
        /// The purchase request id.
        request_id: i64,
        /// The request's current status.
        status: String,
    },
    /// Referenced purchase request does not exist.
    RequestNotFound(i64),
    /// The aggregate has not been persisted and therefore has no id.
    MissingId {
        /// The aggregate kind, for the message.
        kind: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidObservations(msg) => write!(f, "Invalid observations: {msg}"),
            Self::InvalidItemDescription(msg) => {
                write!(f, "Invalid item description: {msg}")
            }
            Self::InvalidUnitOfMeasure(msg) => {
                write!(f, "Invalid unit of measure: {msg}")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Requested quantity must be positive, got {quantity}")
            }
            Self::InvalidUnitPrice { price } => {
                write!(f, "Estimated unit price must be non-negative, got {price}")
            }
            Self::EmptyLineItems => {
                write!(f, "A purchase request must have at least one line item")
            }
            Self::EmptySelection => {
                write!(f, "Consolidation requires at least one purchase request")
            }
            Self::InvalidRequestStatus(status) => {
                write!(f, "Unknown purchase request status: {status}")
            }
            Self::InvalidProcessStatus(status) => {
                write!(f, "Unknown bidding process status: {status}")
            }
            Self::InvalidAggregateKind(kind) => {
                write!(f, "Unknown aggregate kind: {kind}")
            }
            Self::IllegalRequestTransition { from, to, allowed } => {
                write!(
                    f,
                    "Purchase request cannot move from '{from}' to '{to}' (allowed: {})",
                    allowed.join(", ")
                )
            }
            Self::IllegalProcessTransition { from, to, allowed } => {
                write!(
                    f,
                    "Bidding process cannot move from '{from}' to '{to}' (allowed: {})",
                    allowed.join(", ")
                )
            }
            Self::RequestNotEligible { request_id, status } => {
                write!(
                    f,
                    "Purchase request {request_id} is in status '{status}' and cannot be consolidated (requires 'price_research_completed')"
                )
            }
            Self::RequestNotFound(id) => write!(f, "Purchase request {id} not found"),
            Self::MissingId { kind } => {
                write!(f, "{kind} has not been persisted and has no id")
            }
        }
    }
}

impl std::error::Error for DomainError {}

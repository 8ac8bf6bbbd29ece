// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase request status tracking and transition logic.
//!
//! The legal-edge table in [`RequestStatus::allowed_transitions`] is the
//! single source of truth for transitions. It is consumed both by the
//! workflow engine and by callers computing available actions.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a purchase request.
///
/// A request is created in `Draft`, moves through price research, is folded
/// into a bidding process by consolidation, and ends `Approved` or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Initial state. The only state permitting line-item edits or deletion.
    Draft,
    /// Price research in progress.
    PriceResearch,
    /// Price research done; the request is eligible for consolidation.
    PriceResearchCompleted,
    /// Folded into a bidding process by consolidation.
    InBiddingProcess,
    /// Alternate branch: waiting on supply authorization before the decision.
    AwaitingSupplyAuthorization,
    /// Final approval. Terminal.
    Approved,
    /// Final rejection. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PriceResearch => "price_research",
            Self::PriceResearchCompleted => "price_research_completed",
            Self::InBiddingProcess => "in_bidding_process",
            Self::AwaitingSupplyAuthorization => "awaiting_supply_authorization",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "price_research" => Ok(Self::PriceResearch),
            "price_research_completed" => Ok(Self::PriceResearchCompleted),
            "in_bidding_process" => Ok(Self::InBiddingProcess),
            "awaiting_supply_authorization" => Ok(Self::AwaitingSupplyAuthorization),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidRequestStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if line items may still be edited in this status.
    #[must_use]
    pub const fn allows_item_edits(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns the statuses legally reachable from this status.
    ///
    /// Static table; self-transitions are never included.
    #[must_use]
    pub const fn allowed_transitions(&self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::PriceResearch],
            Self::PriceResearch => &[Self::PriceResearchCompleted],
            Self::PriceResearchCompleted => &[Self::InBiddingProcess],
            Self::InBiddingProcess => &[
                Self::AwaitingSupplyAuthorization,
                Self::Approved,
                Self::Rejected,
            ],
            Self::AwaitingSupplyAuthorization => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    /// Validates that a transition from this status to `target` is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalRequestTransition` if `target` is not in
    /// the legal-edge table for this status. Self-transitions always fail.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        let allowed: &'static [Self] = self.allowed_transitions();
        if allowed.contains(&target) {
            Ok(())
        } else {
            Err(DomainError::IllegalRequestTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                allowed: allowed.iter().map(|s| s.as_str().to_string()).collect(),
            })
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Append-only status history for workflow aggregates.
//!
//! Every successful status transition must produce exactly one history
//! entry. Entries are immutable once created and capture who performed the
//! transition, the previous and new statuses, an optional comment, and when
//! it was recorded.

use bidflow_domain::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The entity performing a transition.
///
/// An actor is any identifiable operator that initiates a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's user id.
    pub id: i64,
    /// The actor's role label (e.g., "buyer", "administrator").
    pub role: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The actor's user id
    /// * `role` - The actor's role label
    #[must_use]
    pub const fn new(id: i64, role: String) -> Self {
        Self { id, role }
    }
}

/// The kind of aggregate a history entry is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// A purchase request.
    PurchaseRequest,
    /// A bidding process.
    BiddingProcess,
}

impl AggregateKind {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseRequest => "purchase_request",
            Self::BiddingProcess => "bidding_process",
        }
    }
}

impl FromStr for AggregateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase_request" => Ok(Self::PurchaseRequest),
            "bidding_process" => Ok(Self::BiddingProcess),
            _ => Err(DomainError::InvalidAggregateKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of one status transition.
///
/// Statuses are carried as their wire strings so a single entry type covers
/// both aggregate kinds. The first entry of an aggregate has the aggregate's
/// initial status as `previous_status`; every later entry's `previous_status`
/// equals the prior entry's `new_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The kind of aggregate that transitioned.
    pub kind: AggregateKind,
    /// The aggregate's id.
    pub aggregate_id: i64,
    /// The status before the transition.
    pub previous_status: String,
    /// The status after the transition.
    pub new_status: String,
    /// The actor who performed the transition.
    pub actor: Actor,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// RFC 3339 timestamp of when the transition was recorded.
    pub recorded_at: String,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry`.
    ///
    /// Once created, an entry is immutable; the store only ever appends.
    #[must_use]
    pub const fn new(
        kind: AggregateKind,
        aggregate_id: i64,
        previous_status: String,
        new_status: String,
        actor: Actor,
        comment: Option<String>,
        recorded_at: String,
    ) -> Self {
        Self {
            kind,
            aggregate_id,
            previous_status,
            new_status,
            actor,
            comment,
            recorded_at,
        }
    }
}

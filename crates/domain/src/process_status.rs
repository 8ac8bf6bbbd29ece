// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bidding process status tracking and transition logic.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a bidding process.
///
/// A process is created in `Draft` by consolidation and ends `Closed` or
/// `Cancelled`. Opening a process does not touch its source purchase
/// requests; those already moved when consolidation committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Initial state assigned by consolidation.
    Draft,
    /// Bidding is open.
    Opened,
    /// Bidding concluded. Terminal.
    Closed,
    /// Process abandoned from draft or opened. Terminal.
    Cancelled,
}

impl ProcessStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "opened" => Ok(Self::Opened),
            "closed" => Ok(Self::Closed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidProcessStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// Returns the statuses legally reachable from this status.
    ///
    /// Static table; self-transitions are never included.
    #[must_use]
    pub const fn allowed_transitions(&self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Opened, Self::Cancelled],
            Self::Opened => &[Self::Closed, Self::Cancelled],
            Self::Closed | Self::Cancelled => &[],
        }
    }

    /// Validates that a transition from this status to `target` is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalProcessTransition` if `target` is not in
    /// the legal-edge table for this status. Self-transitions always fail.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        let allowed: &'static [Self] = self.allowed_transitions();
        if allowed.contains(&target) {
            Ok(())
        } else {
            Err(DomainError::IllegalProcessTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                allowed: allowed.iter().map(|s| s.as_str().to_string()).collect(),
            })
        }
    }
}

impl FromStr for ProcessStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

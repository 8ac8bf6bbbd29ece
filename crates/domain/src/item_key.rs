// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical grouping key for line-item deduplication.
//!
//! Two line items consolidate into the same item exactly when their
//! normalized (description, unit of measure) pairs are equal.

use serde::{Deserialize, Serialize};

/// The grouping key derived from a line item's description and unit of measure.
///
/// Normalization lowercases and trims both components. This literal string
/// equality is the sole deduplication criterion: spellings that differ by
/// accent marks or plural form are intentionally NOT unified, matching the
/// behavior the rest of the system depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    /// The normalized description.
    description: String,
    /// The normalized unit of measure.
    unit: String,
}

impl ItemKey {
    /// Creates a new `ItemKey` from a raw description and unit of measure.
    ///
    /// # Arguments
    ///
    /// * `description` - The item description (trimmed and lowercased)
    /// * `unit` - The unit of measure code (trimmed and lowercased)
    #[must_use]
    pub fn new(description: &str, unit: &str) -> Self {
        Self {
            description: description.trim().to_lowercase(),
            unit: unit.trim().to_lowercase(),
        }
    }

    /// Returns the normalized description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the normalized unit of measure.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

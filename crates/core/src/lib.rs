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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Pure workflow engine for purchase-request consolidation and status
//! transitions.
//!
//! Every function in this crate is deterministic and side-effect free: it
//! takes the current aggregate state plus the caller's intent and returns
//! the complete set of effects to apply (new aggregate state and the history
//! entries to append). Persisting those effects atomically is the
//! persistence layer's job; authorization is the API boundary's job.

mod consolidate;
mod error;
mod transition;

#[cfg(test)]
mod tests;

pub use consolidate::{
    ConsolidationInput, ConsolidationPlan, ConsolidationSummary, RequestRelink, plan_consolidation,
};
pub use error::CoreError;
pub use transition::{ProcessTransition, RequestTransition, transition_process, transition_request};

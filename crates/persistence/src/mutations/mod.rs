// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! This module contains all state-changing operations. Every multi-row
//! mutation runs inside an immediate `SQLite` transaction so the status
//! columns, linkage rows, and history entries always change together.
//!
//! ## Module Organization
//!
//! - `requests` — Purchase request and line item mutations
//! - `consolidation` — Atomic consolidation commits
//! - `transitions` — Status transition commits with stale-status checks
//! - `history` — Status history inserts
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported
//! from the `backend` module. All other code uses Diesel DSL exclusively.

pub mod consolidation;
pub mod history;
pub mod requests;
pub mod transitions;

pub use consolidation::persist_consolidation;
pub use history::insert_history_entry;
pub use requests::{insert_purchase_request, replace_line_items, update_process_observations};
pub use transitions::{persist_process_transition, persist_request_transition};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `requests` — Purchase request reconstruction and listings
//! - `processes` — Bidding process reconstruction
//! - `history` — Status history timelines

pub mod history;
pub mod processes;
pub mod requests;

pub use history::get_status_history;
pub use processes::{get_bidding_process, list_source_request_ids};
pub use requests::{get_purchase_request, list_requests_by_status};

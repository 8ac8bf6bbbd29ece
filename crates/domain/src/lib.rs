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

mod error;
mod item_key;
mod process_status;
mod request_status;
mod types;
mod validation;

pub use error::DomainError;
pub use item_key::ItemKey;
pub use process_status::ProcessStatus;
pub use request_status::RequestStatus;
pub use types::{BiddingProcess, ConsolidatedItem, LineItem, PurchaseRequest};
pub use validation::{validate_line_item, validate_observations, validate_title};

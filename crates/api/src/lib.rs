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
#![allow(clippy::multiple_crate_versions)]

//! Typed API boundary for the procurement workflow.
//!
//! This crate is the outermost surface of the workspace: strongly-typed
//! request/response structs, role-based authorization, error translation
//! into the five-kind taxonomy, and handler functions orchestrating the
//! workflow engine and persistence. There is no HTTP layer; callers embed
//! these handlers in whatever request plumbing they run.

mod authorize;
mod error;
mod handlers;
mod input;
mod request_response;

#[cfg(test)]
mod tests;

pub use authorize::{AuthenticatedActor, Role, TransitionAuthorizer};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    available_process_transitions, available_request_transitions, consolidate_purchase_requests,
    get_bidding_process, get_purchase_request, get_status_history, transition_bidding_process,
    transition_purchase_request, update_process_observations,
};
pub use input::InputError;
pub use request_response::{
    AvailableTransitionsResponse, BiddingProcessInfo, ConsolidateRequest, ConsolidateResponse,
    ConsolidatedItemInfo, HistoryEntryInfo, LineItemInfo, PurchaseRequestInfo,
    StatusHistoryResponse, TransitionProcessRequest, TransitionProcessResponse,
    TransitionRequestRequest, TransitionRequestResponse, UpdateObservationsRequest,
    UpdateObservationsResponse,
};

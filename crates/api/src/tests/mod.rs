// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod authorization_tests;
mod transition_tests;

use bidflow_domain::{LineItem, PurchaseRequest};
use bidflow_persistence::Persistence;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::authorize::{AuthenticatedActor, Role};
use crate::handlers::transition_purchase_request;
use crate::request_response::TransitionRequestRequest;

/// Creates a fresh in-memory store for one test.
pub fn store() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("Invalid decimal literal in test")
}

/// The department staffer who creates every test request (user id 42).
pub fn requester() -> AuthenticatedActor {
    AuthenticatedActor::new(42, Role::Requester)
}

pub fn buyer() -> AuthenticatedActor {
    AuthenticatedActor::new(900, Role::Buyer)
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(901, Role::Administrator)
}

pub fn line_item(description: &str, unit: &str, quantity: &str, unit_price: &str) -> LineItem {
    LineItem::new(
        description.to_string(),
        unit.to_string(),
        dec(quantity),
        dec(unit_price),
    )
}

pub fn new_request(title: &str, items: Vec<LineItem>) -> PurchaseRequest {
    PurchaseRequest::new(
        title.to_string(),
        format!("{title} for the facilities office"),
        String::from("Facilities"),
        42,
        items,
    )
}

/// Creates a draft purchase request directly through persistence.
pub fn create_request(persistence: &mut Persistence, title: &str, items: Vec<LineItem>) -> i64 {
    persistence
        .create_purchase_request(&new_request(title, items))
        .expect("Failed to create purchase request")
}

/// Moves a purchase request to `target` through the transition handler.
pub fn advance(
    persistence: &mut Persistence,
    request_id: i64,
    target: &str,
    actor: &AuthenticatedActor,
) {
    let request = TransitionRequestRequest {
        request_id,
        target_status: target.to_string(),
        comment: None,
    };
    transition_purchase_request(persistence, &request, actor)
        .expect("Failed to advance purchase request");
}

/// Creates a request and walks it to `price_research_completed`.
pub fn create_completed_request(
    persistence: &mut Persistence,
    title: &str,
    items: Vec<LineItem>,
) -> i64 {
    let request_id: i64 = create_request(persistence, title, items);
    advance(persistence, request_id, "price_research", &requester());
    advance(persistence, request_id, "price_research_completed", &buyer());
    request_id
}

/// The three-request scenario used across the consolidation tests.
///
/// Request 1: 10 boxes of A4 paper at 20.00.
/// Request 2: 5 boxes of a4 paper at 22.00 plus 100 pens at 1.50.
/// Request 3: 3 boxes of A4 paper at 19.00.
pub fn setup_three_requests(persistence: &mut Persistence) -> Vec<i64> {
    let first: i64 = create_completed_request(
        persistence,
        "Office paper restock",
        vec![line_item("Paper A4", "box", "10", "20.00")],
    );
    let second: i64 = create_completed_request(
        persistence,
        "Stationery order",
        vec![
            line_item("paper a4", "box", "5", "22.00"),
            line_item("Pen", "unit", "100", "1.50"),
        ],
    );
    let third: i64 = create_completed_request(
        persistence,
        "Archive supplies",
        vec![line_item("Paper A4 ", "box", "3", "19.00")],
    );
    vec![first, second, third]
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod request_tests;

use rust_decimal::Decimal;
use std::str::FromStr;

use bidflow::{ConsolidationInput, ConsolidationPlan, plan_consolidation, transition_request};
use bidflow_domain::{LineItem, PurchaseRequest, RequestStatus};
use bidflow_history::Actor;

use crate::Persistence;

pub const RECORDED_AT: &str = "2026-03-01T10:00:00Z";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn create_test_actor() -> Actor {
    Actor::new(900, String::from("buyer"))
}

pub fn line_item(description: &str, unit: &str, quantity: &str, price: &str) -> LineItem {
    LineItem::new(
        description.to_string(),
        unit.to_string(),
        dec(quantity),
        dec(price),
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

/// Commits a single status transition for a stored request.
pub fn advance(
    persistence: &mut Persistence,
    request_id: i64,
    target: RequestStatus,
    recorded_at: &str,
) {
    let request: PurchaseRequest = persistence.get_purchase_request(request_id).unwrap();
    let transition = transition_request(
        &request,
        target,
        &create_test_actor(),
        None,
        recorded_at,
    )
    .unwrap();
    persistence.persist_request_transition(&transition).unwrap();
}

/// Creates a request and walks it to `price_research_completed`.
pub fn create_completed_request(
    persistence: &mut Persistence,
    title: &str,
    items: Vec<LineItem>,
) -> i64 {
    let request_id: i64 = persistence
        .create_purchase_request(&new_request(title, items))
        .unwrap();
    advance(
        persistence,
        request_id,
        RequestStatus::PriceResearch,
        "2026-02-01T09:00:00Z",
    );
    advance(
        persistence,
        request_id,
        RequestStatus::PriceResearchCompleted,
        "2026-02-15T09:00:00Z",
    );
    request_id
}

/// Builds a consolidation plan from the current stored state of the
/// given requests.
pub fn plan_from_store(
    persistence: &mut Persistence,
    request_ids: &[i64],
    title: &str,
) -> ConsolidationPlan {
    let requests: Vec<PurchaseRequest> = request_ids
        .iter()
        .map(|id| persistence.get_purchase_request(*id).unwrap())
        .collect();
    let input = ConsolidationInput {
        request_ids: request_ids.to_vec(),
        title: title.to_string(),
        observations: None,
    };
    plan_consolidation(&requests, &input, &create_test_actor(), RECORDED_AT).unwrap()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bidflow_domain::{LineItem, PurchaseRequest, RequestStatus};
use bidflow_history::Actor;
use rust_decimal::Decimal;
use std::str::FromStr;

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

pub fn completed_request(id: i64, items: Vec<LineItem>) -> PurchaseRequest {
    PurchaseRequest::with_id(
        id,
        format!("Request {id}"),
        String::from("Department ask"),
        String::from("facilities"),
        7,
        RequestStatus::PriceResearchCompleted,
        items,
        None,
        None,
    )
}

/// The three-request fixture from the consolidation acceptance scenario:
/// R1 and R3 share a "Paper A4"/box item with R2's lowercase spelling,
/// and R2 additionally asks for pens.
pub fn scenario_requests() -> Vec<PurchaseRequest> {
    vec![
        completed_request(1, vec![line_item("Paper A4", "box", "10", "20.00")]),
        completed_request(
            2,
            vec![
                line_item("paper a4", "box", "5", "22.00"),
                line_item("Pen", "unit", "100", "1.50"),
            ],
        ),
        completed_request(3, vec![line_item("Paper A4", "box", "3", "19.00")]),
    ]
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{advance, dec, line_item, new_request};
use crate::{Persistence, PersistenceError};
use bidflow_domain::{DomainError, PurchaseRequest, RequestStatus};

#[test]
fn test_create_and_retrieve_request() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let request_id: i64 = persistence
        .create_purchase_request(&new_request(
            "Office supplies",
            vec![
                line_item("Paper A4", "box", "10", "20.00"),
                line_item("Pen", "unit", "100", "1.50"),
            ],
        ))
        .unwrap();

    let loaded: PurchaseRequest = persistence.get_purchase_request(request_id).unwrap();
    assert_eq!(loaded.id, Some(request_id));
    assert_eq!(loaded.title, "Office supplies");
    assert_eq!(loaded.department, "Facilities");
    assert_eq!(loaded.created_by, 42);
    assert_eq!(loaded.status, RequestStatus::Draft);
    assert_eq!(loaded.approved_total, None);
    assert_eq!(loaded.bidding_process_id, None);

    // Line items come back in insertion order with exact decimals.
    assert_eq!(loaded.line_items.len(), 2);
    assert_eq!(loaded.line_items[0].description, "Paper A4");
    assert_eq!(loaded.line_items[0].quantity, dec("10"));
    assert_eq!(loaded.line_items[0].unit_price, dec("20.00"));
    assert_eq!(loaded.line_items[1].description, "Pen");
    assert_eq!(loaded.estimated_total(), dec("350.00"));
}

#[test]
fn test_unknown_request_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.get_purchase_request(99);
    assert_eq!(result, Err(PersistenceError::RequestNotFound(99)));
}

#[test]
fn test_replace_line_items_on_draft() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let request_id: i64 = persistence
        .create_purchase_request(&new_request(
            "Office supplies",
            vec![line_item("Paper A4", "box", "10", "20.00")],
        ))
        .unwrap();

    persistence
        .replace_line_items(
            request_id,
            &[
                line_item("Toner", "unit", "4", "80.00"),
                line_item("Stapler", "unit", "2", "12.50"),
            ],
        )
        .unwrap();

    let loaded: PurchaseRequest = persistence.get_purchase_request(request_id).unwrap();
    assert_eq!(loaded.line_items.len(), 2);
    assert_eq!(loaded.line_items[0].description, "Toner");
    assert_eq!(loaded.estimated_total(), dec("345.00"));
}

#[test]
fn test_line_items_lock_after_draft() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let request_id: i64 = persistence
        .create_purchase_request(&new_request(
            "Office supplies",
            vec![line_item("Paper A4", "box", "10", "20.00")],
        ))
        .unwrap();
    advance(
        &mut persistence,
        request_id,
        RequestStatus::PriceResearch,
        "2026-02-01T09:00:00Z",
    );

    let result = persistence.replace_line_items(
        request_id,
        &[line_item("Toner", "unit", "4", "80.00")],
    );

    assert_eq!(
        result,
        Err(PersistenceError::RequestLocked {
            request_id,
            status: String::from("price_research"),
        })
    );

    // The original items are untouched.
    let loaded: PurchaseRequest = persistence.get_purchase_request(request_id).unwrap();
    assert_eq!(loaded.line_items[0].description, "Paper A4");
}

#[test]
fn test_list_requests_by_status() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let first: i64 = persistence
        .create_purchase_request(&new_request(
            "Office supplies",
            vec![line_item("Paper A4", "box", "10", "20.00")],
        ))
        .unwrap();
    let second: i64 = persistence
        .create_purchase_request(&new_request(
            "Cleaning supplies",
            vec![line_item("Soap", "unit", "30", "2.00")],
        ))
        .unwrap();
    advance(
        &mut persistence,
        second,
        RequestStatus::PriceResearch,
        "2026-02-01T09:00:00Z",
    );

    let drafts = persistence
        .list_requests_by_status(RequestStatus::Draft)
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, Some(first));

    let researching = persistence
        .list_requests_by_status(RequestStatus::PriceResearch)
        .unwrap();
    assert_eq!(researching.len(), 1);
    assert_eq!(researching[0].id, Some(second));

    let approved = persistence
        .list_requests_by_status(RequestStatus::Approved)
        .unwrap();
    assert!(approved.is_empty());
}

#[test]
fn test_create_rejects_empty_line_items() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_purchase_request(&new_request("Office supplies", vec![]));

    assert_eq!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::EmptyLineItems
        ))
    );

    // Nothing was written.
    let drafts = persistence
        .list_requests_by_status(RequestStatus::Draft)
        .unwrap();
    assert!(drafts.is_empty());
}

#[test]
fn test_create_rejects_non_positive_quantity() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_purchase_request(&new_request(
        "Office supplies",
        vec![line_item("Paper A4", "box", "-5", "20.00")],
    ));

    assert_eq!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidQuantity {
                quantity: dec("-5"),
            }
        ))
    );
}

#[test]
fn test_create_rejects_blank_title() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_purchase_request(&new_request(
        "   ",
        vec![line_item("Paper A4", "box", "10", "20.00")],
    ));

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(DomainError::InvalidTitle(
            _
        )))
    ));
}

#[test]
fn test_replace_rejects_invalid_items_and_keeps_originals() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let request_id: i64 = persistence
        .create_purchase_request(&new_request(
            "Office supplies",
            vec![line_item("Paper A4", "box", "10", "20.00")],
        ))
        .unwrap();

    let emptied = persistence.replace_line_items(request_id, &[]);
    assert_eq!(
        emptied,
        Err(PersistenceError::DomainViolation(
            DomainError::EmptyLineItems
        ))
    );

    let negated = persistence
        .replace_line_items(request_id, &[line_item("Paper A4", "box", "-5", "20.00")]);
    assert_eq!(
        negated,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidQuantity {
                quantity: dec("-5"),
            }
        ))
    );

    let loaded: PurchaseRequest = persistence.get_purchase_request(request_id).unwrap();
    assert_eq!(loaded.line_items.len(), 1);
    assert_eq!(loaded.line_items[0].quantity, dec("10"));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the transition handlers.

use crate::error::ApiError;
use crate::handlers::{
    available_process_transitions, consolidate_purchase_requests, get_purchase_request,
    transition_bidding_process, transition_purchase_request,
};
use crate::request_response::{
    ConsolidateRequest, TransitionProcessRequest, TransitionRequestRequest,
};
use crate::tests::{
    admin, advance, buyer, create_request, line_item, requester, setup_three_requests, store,
};
use bidflow_persistence::Persistence;

fn consolidated_scenario(persistence: &mut Persistence) -> (Vec<i64>, i64) {
    let ids: Vec<i64> = setup_three_requests(persistence);
    let request = ConsolidateRequest {
        request_ids: ids.clone(),
        title: String::from("Consolidated purchase 2026/14"),
        observations: None,
    };
    let process_id: i64 = consolidate_purchase_requests(persistence, &request, &buyer())
        .expect("Failed to consolidate")
        .process_id;
    (ids, process_id)
}

#[test]
fn test_full_request_lifecycle_to_approval() {
    let mut persistence = store();
    let (ids, _) = consolidated_scenario(&mut persistence);
    advance(
        &mut persistence,
        ids[0],
        "awaiting_supply_authorization",
        &buyer(),
    );

    let request = TransitionRequestRequest {
        request_id: ids[0],
        target_status: String::from("approved"),
        comment: Some(String::from("Budget confirmed")),
    };
    let response = transition_purchase_request(&mut persistence, &request, &admin())
        .expect("Failed to approve");

    assert_eq!(response.previous_status, "awaiting_supply_authorization");
    assert_eq!(response.new_status, "approved");
    // 10 boxes of A4 paper at 20.00.
    assert_eq!(response.approved_total.as_deref(), Some("200.00"));

    let stored = get_purchase_request(&mut persistence, ids[0]).expect("Failed to load request");
    assert_eq!(stored.status, "approved");
    assert_eq!(stored.approved_total.as_deref(), Some("200.00"));
}

#[test]
fn test_rejection_records_no_approved_total() {
    let mut persistence = store();
    let (ids, _) = consolidated_scenario(&mut persistence);

    let request = TransitionRequestRequest {
        request_id: ids[1],
        target_status: String::from("rejected"),
        comment: Some(String::from("Out of budget this quarter")),
    };
    let response = transition_purchase_request(&mut persistence, &request, &admin())
        .expect("Failed to reject");

    assert_eq!(response.new_status, "rejected");
    assert_eq!(response.approved_total, None);
}

#[test]
fn test_illegal_transition_reports_allowed_targets() {
    let mut persistence = store();
    let request_id: i64 = create_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );

    let request = TransitionRequestRequest {
        request_id,
        target_status: String::from("approved"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &admin());

    assert_eq!(
        result,
        Err(ApiError::IllegalTransition {
            from: String::from("draft"),
            to: String::from("approved"),
            allowed: vec![String::from("price_research")],
        })
    );
}

#[test]
fn test_unknown_status_string_is_a_validation_error() {
    let mut persistence = store();
    let request_id: i64 = create_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );

    let request = TransitionRequestRequest {
        request_id,
        target_status: String::from("archived"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &requester());

    assert!(matches!(result, Err(ApiError::Validation { .. })));
}

#[test]
fn test_transition_on_unknown_request_is_not_found() {
    let mut persistence = store();

    let request = TransitionRequestRequest {
        request_id: 99,
        target_status: String::from("price_research"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &requester());

    assert_eq!(
        result,
        Err(ApiError::NotFound {
            resource: String::from("Purchase request"),
            message: String::from("Purchase request 99 does not exist"),
        })
    );
}

#[test]
fn test_process_can_be_opened_and_closed() {
    let mut persistence = store();
    let (_, process_id) = consolidated_scenario(&mut persistence);

    let open = TransitionProcessRequest {
        process_id,
        target_status: String::from("opened"),
        comment: None,
    };
    let opened = transition_bidding_process(&mut persistence, &open, &buyer())
        .expect("Failed to open process");
    assert_eq!(opened.previous_status, "draft");
    assert_eq!(opened.new_status, "opened");

    let close = TransitionProcessRequest {
        process_id,
        target_status: String::from("closed"),
        comment: Some(String::from("All quotes received")),
    };
    let closed = transition_bidding_process(&mut persistence, &close, &buyer())
        .expect("Failed to close process");
    assert_eq!(closed.previous_status, "opened");
    assert_eq!(closed.new_status, "closed");
}

#[test]
fn test_closed_process_cannot_reopen() {
    let mut persistence = store();
    let (_, process_id) = consolidated_scenario(&mut persistence);
    for target in ["opened", "closed"] {
        let request = TransitionProcessRequest {
            process_id,
            target_status: target.to_string(),
            comment: None,
        };
        transition_bidding_process(&mut persistence, &request, &buyer())
            .expect("Failed to advance process");
    }

    let reopen = TransitionProcessRequest {
        process_id,
        target_status: String::from("opened"),
        comment: None,
    };
    let result = transition_bidding_process(&mut persistence, &reopen, &buyer());

    assert_eq!(
        result,
        Err(ApiError::IllegalTransition {
            from: String::from("closed"),
            to: String::from("opened"),
            allowed: Vec::new(),
        })
    );
}

#[test]
fn test_opening_a_process_leaves_source_requests_untouched() {
    let mut persistence = store();
    let (ids, process_id) = consolidated_scenario(&mut persistence);

    let open = TransitionProcessRequest {
        process_id,
        target_status: String::from("opened"),
        comment: None,
    };
    transition_bidding_process(&mut persistence, &open, &buyer()).expect("Failed to open process");

    for &request_id in &ids {
        let source = get_purchase_request(&mut persistence, request_id)
            .expect("Failed to load request");
        assert_eq!(source.status, "in_bidding_process");
    }
}

#[test]
fn test_available_process_transitions_shrink_with_lifecycle() {
    let mut persistence = store();
    let (_, process_id) = consolidated_scenario(&mut persistence);

    let at_draft = available_process_transitions(&mut persistence, process_id, &buyer())
        .expect("Failed to compute available transitions");
    assert_eq!(at_draft.current_status, "draft");
    assert_eq!(at_draft.available, vec!["opened", "cancelled"]);

    let open = TransitionProcessRequest {
        process_id,
        target_status: String::from("opened"),
        comment: None,
    };
    transition_bidding_process(&mut persistence, &open, &buyer()).expect("Failed to open process");

    let at_opened = available_process_transitions(&mut persistence, process_id, &buyer())
        .expect("Failed to compute available transitions");
    assert_eq!(at_opened.available, vec!["closed", "cancelled"]);
}

#[test]
fn test_estimated_total_tracks_current_line_items() {
    let mut persistence = store();
    let request_id: i64 = create_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );

    let before = get_purchase_request(&mut persistence, request_id)
        .expect("Failed to load request");
    assert_eq!(before.estimated_total, "140.00");

    persistence
        .replace_line_items(
            request_id,
            &[
                line_item("Desk lamp", "unit", "4", "35.00"),
                line_item("Bulb", "unit", "8", "2.50"),
            ],
        )
        .expect("Failed to replace line items");

    let after = get_purchase_request(&mut persistence, request_id)
        .expect("Failed to load request");
    assert_eq!(after.estimated_total, "160.00");
}

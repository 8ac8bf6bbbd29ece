// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the role table and the self-decision rule.

use bidflow_persistence::Persistence;

use crate::authorize::{AuthenticatedActor, Role, TransitionAuthorizer};
use crate::error::ApiError;
use crate::handlers::{
    available_request_transitions, consolidate_purchase_requests, transition_bidding_process,
    transition_purchase_request,
};
use crate::request_response::{
    ConsolidateRequest, TransitionProcessRequest, TransitionRequestRequest,
};
use crate::tests::{
    admin, advance, buyer, create_completed_request, create_request, line_item, requester,
    setup_three_requests, store,
};

fn consolidate_scenario(persistence: &mut Persistence) -> i64 {
    let ids: Vec<i64> = setup_three_requests(persistence);
    let request = ConsolidateRequest {
        request_ids: ids,
        title: String::from("Consolidated purchase 2026/14"),
        observations: None,
    };
    consolidate_purchase_requests(persistence, &request, &buyer())
        .expect("Failed to consolidate")
        .process_id
}

#[test]
fn test_requester_may_submit_own_request() {
    let mut persistence = store();
    let request_id: i64 = create_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );

    let request = TransitionRequestRequest {
        request_id,
        target_status: String::from("price_research"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &requester());

    assert!(result.is_ok());
}

#[test]
fn test_requester_cannot_complete_price_research() {
    let mut persistence = store();
    let request_id: i64 = create_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );
    advance(&mut persistence, request_id, "price_research", &requester());

    let request = TransitionRequestRequest {
        request_id,
        target_status: String::from("price_research_completed"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &requester());

    assert_eq!(
        result,
        Err(ApiError::Forbidden {
            action: String::from("transition_request_to_price_research_completed"),
            required_role: String::from("the Buyer or Administrator role"),
        })
    );
}

#[test]
fn test_buyer_cannot_approve() {
    let mut persistence = store();
    let ids: Vec<i64> = setup_three_requests(&mut persistence);
    consolidate_scenario_with(&mut persistence, &ids);

    let request = TransitionRequestRequest {
        request_id: ids[0],
        target_status: String::from("approved"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &buyer());

    assert_eq!(
        result,
        Err(ApiError::Forbidden {
            action: String::from("transition_request_to_approved"),
            required_role: String::from("the Administrator role"),
        })
    );
}

fn consolidate_scenario_with(persistence: &mut Persistence, ids: &[i64]) {
    let request = ConsolidateRequest {
        request_ids: ids.to_vec(),
        title: String::from("Consolidated purchase 2026/14"),
        observations: None,
    };
    consolidate_purchase_requests(persistence, &request, &buyer()).expect("Failed to consolidate");
}

#[test]
fn test_admin_may_approve_request_created_by_someone_else() {
    let mut persistence = store();
    let ids: Vec<i64> = setup_three_requests(&mut persistence);
    consolidate_scenario_with(&mut persistence, &ids);

    let request = TransitionRequestRequest {
        request_id: ids[0],
        target_status: String::from("approved"),
        comment: Some(String::from("Budget confirmed")),
    };
    let result = transition_purchase_request(&mut persistence, &request, &admin());

    assert!(result.is_ok());
}

#[test]
fn test_creator_cannot_decide_own_request_even_as_admin() {
    let mut persistence = store();
    let ids: Vec<i64> = setup_three_requests(&mut persistence);
    consolidate_scenario_with(&mut persistence, &ids);

    // Same user id as the creator of every test request.
    let creator_admin = AuthenticatedActor::new(42, Role::Administrator);
    let request = TransitionRequestRequest {
        request_id: ids[0],
        target_status: String::from("rejected"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &creator_admin);

    assert_eq!(
        result,
        Err(ApiError::Forbidden {
            action: String::from("transition_request_to_rejected"),
            required_role: String::from("an administrator other than the creator"),
        })
    );
}

#[test]
fn test_direct_move_into_bidding_process_is_forbidden_for_everyone() {
    let mut persistence = store();
    let request_id: i64 = create_completed_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );

    let request = TransitionRequestRequest {
        request_id,
        target_status: String::from("in_bidding_process"),
        comment: None,
    };
    let result = transition_purchase_request(&mut persistence, &request, &admin());

    assert_eq!(
        result,
        Err(ApiError::Forbidden {
            action: String::from("move_request_into_bidding_process"),
            required_role: String::from("a consolidation commit"),
        })
    );
}

#[test]
fn test_requester_cannot_consolidate() {
    let mut persistence = store();
    let ids: Vec<i64> = setup_three_requests(&mut persistence);

    let request = ConsolidateRequest {
        request_ids: ids,
        title: String::from("Consolidated purchase 2026/14"),
        observations: None,
    };
    let result = consolidate_purchase_requests(&mut persistence, &request, &requester());

    assert_eq!(
        result,
        Err(ApiError::Forbidden {
            action: String::from("consolidate_purchase_requests"),
            required_role: String::from("the Buyer or Administrator role"),
        })
    );
}

#[test]
fn test_requester_cannot_open_process() {
    let mut persistence = store();
    let process_id: i64 = consolidate_scenario(&mut persistence);

    let request = TransitionProcessRequest {
        process_id,
        target_status: String::from("opened"),
        comment: None,
    };
    let result = transition_bidding_process(&mut persistence, &request, &requester());

    assert_eq!(
        result,
        Err(ApiError::Forbidden {
            action: String::from("transition_process_to_opened"),
            required_role: String::from("the Buyer or Administrator role"),
        })
    );
}

#[test]
fn test_available_transitions_filtered_by_role() {
    let mut persistence = store();
    let ids: Vec<i64> = setup_three_requests(&mut persistence);
    consolidate_scenario_with(&mut persistence, &ids);

    // In `in_bidding_process` the legal targets are awaiting supply
    // authorization, approved, and rejected.
    let for_requester = available_request_transitions(&mut persistence, ids[0], &requester())
        .expect("Failed to compute available transitions");
    assert_eq!(for_requester.current_status, "in_bidding_process");
    assert!(for_requester.available.is_empty());

    let for_buyer = available_request_transitions(&mut persistence, ids[0], &buyer())
        .expect("Failed to compute available transitions");
    assert_eq!(for_buyer.available, vec!["awaiting_supply_authorization"]);

    let for_admin = available_request_transitions(&mut persistence, ids[0], &admin())
        .expect("Failed to compute available transitions");
    assert_eq!(
        for_admin.available,
        vec!["awaiting_supply_authorization", "approved", "rejected"]
    );
}

#[test]
fn test_available_transitions_empty_for_creator_admin_on_decision_states() {
    let mut persistence = store();
    let ids: Vec<i64> = setup_three_requests(&mut persistence);
    consolidate_scenario_with(&mut persistence, &ids);
    advance(
        &mut persistence,
        ids[0],
        "awaiting_supply_authorization",
        &buyer(),
    );

    // The creator holds the Administrator role but may not decide their
    // own request, so only the self-decision-gated targets drop out.
    let creator_admin = AuthenticatedActor::new(42, Role::Administrator);
    let response = available_request_transitions(&mut persistence, ids[0], &creator_admin)
        .expect("Failed to compute available transitions");

    assert_eq!(response.current_status, "awaiting_supply_authorization");
    assert!(response.available.is_empty());
}

#[test]
fn test_role_labels_round_trip() {
    for role in [Role::Requester, Role::Buyer, Role::Administrator] {
        let parsed: Role = role.as_str().parse().expect("Role label should parse");
        assert_eq!(parsed, role);
    }
    assert!("supervisor".parse::<Role>().is_err());
}

#[test]
fn test_authorizer_is_pure_over_repeated_calls() {
    let mut persistence = store();
    let request_id: i64 = create_completed_request(
        &mut persistence,
        "Desk lamps",
        vec![line_item("Desk lamp", "unit", "4", "35.00")],
    );
    let request = persistence
        .get_purchase_request(request_id)
        .expect("Failed to load request");

    let first = TransitionAuthorizer::available_request_transitions(&buyer(), &request);
    let second = TransitionAuthorizer::available_request_transitions(&buyer(), &request);

    assert_eq!(first, second);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for workflow operations.
//!
//! Each mutating handler follows the same shape: authorize the actor,
//! load the current aggregate state, compute the effects with the pure
//! workflow engine, and commit them atomically through persistence. Any
//! failure before the commit leaves the store untouched; a failed commit
//! rolls back.

use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use bidflow::{
    ConsolidationInput, ConsolidationPlan, ProcessTransition, RequestTransition,
    plan_consolidation, transition_process, transition_request,
};
use bidflow_domain::{
    BiddingProcess, ConsolidatedItem, LineItem, ProcessStatus, PurchaseRequest, RequestStatus,
    validate_observations,
};
use bidflow_history::{AggregateKind, HistoryEntry};
use bidflow_persistence::Persistence;

use crate::authorize::{AuthenticatedActor, TransitionAuthorizer};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AvailableTransitionsResponse, BiddingProcessInfo, ConsolidateRequest, ConsolidateResponse,
    ConsolidatedItemInfo, HistoryEntryInfo, LineItemInfo, PurchaseRequestInfo,
    StatusHistoryResponse, TransitionProcessRequest, TransitionProcessResponse,
    TransitionRequestRequest, TransitionRequestResponse, UpdateObservationsRequest,
    UpdateObservationsResponse,
};

/// Returns the current instant as an RFC 3339 string.
///
/// The clock is read only here, at the boundary; the workflow engine
/// receives timestamps as inputs.
fn now_rfc3339() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Persistence {
            message: format!("Failed to format timestamp: {e}"),
        })
}

fn line_item_info(item: &LineItem) -> LineItemInfo {
    LineItemInfo {
        description: item.description.clone(),
        unit: item.unit.clone(),
        quantity: item.quantity.to_string(),
        unit_price: item.unit_price.to_string(),
    }
}

fn consolidated_item_info(item: &ConsolidatedItem) -> ConsolidatedItemInfo {
    ConsolidatedItemInfo {
        description: item.description.clone(),
        unit: item.unit.clone(),
        total_quantity: item.total_quantity.to_string(),
        unit_price: item.unit_price.to_string(),
        source_request_ids: item.source_request_ids.clone(),
    }
}

/// Consolidates a set of purchase requests into a new bidding process.
///
/// This function:
/// - Verifies the actor has procurement authority
/// - Loads every selected purchase request
/// - Computes the merge plan with the workflow engine
/// - Commits the plan atomically (process creation, source relinks,
///   history entries)
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The consolidation request
/// * `authenticated_actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks procurement authority
/// - The selection is empty, a request is unknown, or a request is not in
///   `price_research_completed`
/// - A source request changed status before the commit
pub fn consolidate_purchase_requests(
    persistence: &mut Persistence,
    request: &ConsolidateRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ConsolidateResponse, ApiError> {
    TransitionAuthorizer::authorize_consolidation(authenticated_actor)?;

    let mut sources: Vec<PurchaseRequest> = Vec::with_capacity(request.request_ids.len());
    for &request_id in &request.request_ids {
        let source: PurchaseRequest = persistence
            .get_purchase_request(request_id)
            .map_err(translate_persistence_error)?;
        sources.push(source);
    }

    let input = ConsolidationInput {
        request_ids: request.request_ids.clone(),
        title: request.title.clone(),
        observations: request.observations.clone(),
    };
    let recorded_at: String = now_rfc3339()?;
    let actor = authenticated_actor.to_history_actor();

    let plan: ConsolidationPlan =
        plan_consolidation(&sources, &input, &actor, &recorded_at).map_err(translate_core_error)?;

    let process_id: i64 = persistence
        .persist_consolidation(&plan)
        .map_err(translate_persistence_error)?;

    info!(
        process_id,
        source_request_count = plan.summary.source_request_count,
        "Consolidation committed"
    );

    Ok(ConsolidateResponse {
        process_id,
        items: plan.process.items.iter().map(consolidated_item_info).collect(),
        unique_item_count: plan.summary.unique_item_count,
        total_quantity: plan.summary.total_quantity.to_string(),
        total_estimated_value: plan.summary.total_estimated_value.to_string(),
        source_request_count: plan.summary.source_request_count,
        message: format!(
            "Bidding process {process_id} created from {} purchase requests",
            plan.summary.source_request_count
        ),
    })
}

/// Transitions a purchase request to a new status.
///
/// Legality against the current status comes from the state machine;
/// permission comes from the role table, including the self-decision rule
/// for approvals and rejections. On success exactly one history entry is
/// recorded with the status update in the same transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The transition request
/// * `authenticated_actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - The target status string is unknown
/// - The purchase request does not exist
/// - The transition is illegal from the current status
/// - The actor's role does not permit the target status
/// - The request changed status before the commit
pub fn transition_purchase_request(
    persistence: &mut Persistence,
    request: &TransitionRequestRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<TransitionRequestResponse, ApiError> {
    let target: RequestStatus =
        RequestStatus::from_str(&request.target_status).map_err(translate_domain_error)?;

    let current: PurchaseRequest = persistence
        .get_purchase_request(request.request_id)
        .map_err(translate_persistence_error)?;

    // Legality before permission: an illegal edge is reported as such even
    // when the actor could not have performed it anyway.
    current
        .status
        .validate_transition(target)
        .map_err(translate_domain_error)?;
    TransitionAuthorizer::authorize_request_transition(authenticated_actor, &current, target)?;

    let recorded_at: String = now_rfc3339()?;
    let actor = authenticated_actor.to_history_actor();
    let transition: RequestTransition = transition_request(
        &current,
        target,
        &actor,
        request.comment.clone(),
        &recorded_at,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_request_transition(&transition)
        .map_err(translate_persistence_error)?;

    info!(
        request_id = request.request_id,
        from = transition.previous_status.as_str(),
        to = target.as_str(),
        "Purchase request transitioned"
    );

    Ok(TransitionRequestResponse {
        request_id: request.request_id,
        previous_status: transition.previous_status.as_str().to_string(),
        new_status: target.as_str().to_string(),
        approved_total: transition
            .request
            .approved_total
            .map(|total| total.to_string()),
        message: format!(
            "Purchase request {} moved to '{}'",
            request.request_id,
            target.as_str()
        ),
    })
}

/// Transitions a bidding process to a new status.
///
/// Opening or closing a process never touches its source purchase
/// requests; those moved when consolidation committed.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The transition request
/// * `authenticated_actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - The target status string is unknown
/// - The bidding process does not exist
/// - The transition is illegal from the current status
/// - The actor lacks procurement authority
/// - The process changed status before the commit
pub fn transition_bidding_process(
    persistence: &mut Persistence,
    request: &TransitionProcessRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<TransitionProcessResponse, ApiError> {
    let target: ProcessStatus =
        ProcessStatus::from_str(&request.target_status).map_err(translate_domain_error)?;

    let current: BiddingProcess = persistence
        .get_bidding_process(request.process_id)
        .map_err(translate_persistence_error)?;

    current
        .status
        .validate_transition(target)
        .map_err(translate_domain_error)?;
    TransitionAuthorizer::authorize_process_transition(authenticated_actor, target)?;

    let recorded_at: String = now_rfc3339()?;
    let actor = authenticated_actor.to_history_actor();
    let transition: ProcessTransition = transition_process(
        &current,
        target,
        &actor,
        request.comment.clone(),
        &recorded_at,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_process_transition(&transition)
        .map_err(translate_persistence_error)?;

    info!(
        process_id = request.process_id,
        from = transition.previous_status.as_str(),
        to = target.as_str(),
        "Bidding process transitioned"
    );

    Ok(TransitionProcessResponse {
        process_id: request.process_id,
        previous_status: transition.previous_status.as_str().to_string(),
        new_status: target.as_str().to_string(),
        message: format!(
            "Bidding process {} moved to '{}'",
            request.process_id,
            target.as_str()
        ),
    })
}

/// Retrieves a purchase request with its line items and derived totals.
///
/// Reads require no authorization.
///
/// # Errors
///
/// Returns an error if the request does not exist.
pub fn get_purchase_request(
    persistence: &mut Persistence,
    request_id: i64,
) -> Result<PurchaseRequestInfo, ApiError> {
    let request: PurchaseRequest = persistence
        .get_purchase_request(request_id)
        .map_err(translate_persistence_error)?;

    Ok(PurchaseRequestInfo {
        request_id,
        title: request.title.clone(),
        description: request.description.clone(),
        department: request.department.clone(),
        created_by: request.created_by,
        status: request.status.as_str().to_string(),
        line_items: request.line_items.iter().map(line_item_info).collect(),
        estimated_total: request.estimated_total().to_string(),
        approved_total: request.approved_total.map(|total| total.to_string()),
        bidding_process_id: request.bidding_process_id,
    })
}

/// Retrieves a bidding process with its items and source request ids.
///
/// Reads require no authorization.
///
/// # Errors
///
/// Returns an error if the process does not exist.
pub fn get_bidding_process(
    persistence: &mut Persistence,
    process_id: i64,
) -> Result<BiddingProcessInfo, ApiError> {
    let process: BiddingProcess = persistence
        .get_bidding_process(process_id)
        .map_err(translate_persistence_error)?;
    let source_request_ids: Vec<i64> = persistence
        .list_source_request_ids(process_id)
        .map_err(translate_persistence_error)?;

    Ok(BiddingProcessInfo {
        process_id,
        title: process.title.clone(),
        status: process.status.as_str().to_string(),
        items: process.items.iter().map(consolidated_item_info).collect(),
        observations: process.observations.clone(),
        created_by: process.created_by,
        source_request_ids,
    })
}

/// Updates the free-text observations of a bidding process.
///
/// Observations and status are the only mutable fields of a process; the
/// item list and source links are fixed at consolidation time.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks procurement authority
/// - The observations text fails validation
/// - The process does not exist
pub fn update_process_observations(
    persistence: &mut Persistence,
    request: &UpdateObservationsRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<UpdateObservationsResponse, ApiError> {
    TransitionAuthorizer::authorize_observations_update(authenticated_actor)?;
    validate_observations(request.observations.as_deref()).map_err(translate_domain_error)?;

    persistence
        .update_process_observations(request.process_id, request.observations.as_deref())
        .map_err(translate_persistence_error)?;

    Ok(UpdateObservationsResponse {
        process_id: request.process_id,
        message: format!("Bidding process {} observations updated", request.process_id),
    })
}

/// Lists the transitions an actor may perform on a purchase request.
///
/// Combines the legal-edge table with the role table, so the result is
/// exactly the set of targets `transition_purchase_request` would accept
/// for this actor right now.
///
/// # Errors
///
/// Returns an error if the request does not exist.
pub fn available_request_transitions(
    persistence: &mut Persistence,
    request_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AvailableTransitionsResponse, ApiError> {
    let request: PurchaseRequest = persistence
        .get_purchase_request(request_id)
        .map_err(translate_persistence_error)?;

    let available: Vec<String> =
        TransitionAuthorizer::available_request_transitions(authenticated_actor, &request)
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();

    Ok(AvailableTransitionsResponse {
        current_status: request.status.as_str().to_string(),
        available,
    })
}

/// Lists the transitions an actor may perform on a bidding process.
///
/// # Errors
///
/// Returns an error if the process does not exist.
pub fn available_process_transitions(
    persistence: &mut Persistence,
    process_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AvailableTransitionsResponse, ApiError> {
    let process: BiddingProcess = persistence
        .get_bidding_process(process_id)
        .map_err(translate_persistence_error)?;

    let available: Vec<String> =
        TransitionAuthorizer::available_process_transitions(authenticated_actor, process.status)
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();

    Ok(AvailableTransitionsResponse {
        current_status: process.status.as_str().to_string(),
        available,
    })
}

/// Retrieves the status history of an aggregate in recording order.
///
/// Reads require no authorization. An aggregate that has never
/// transitioned has an empty timeline.
///
/// # Errors
///
/// Returns an error if the timeline cannot be read.
pub fn get_status_history(
    persistence: &mut Persistence,
    kind: AggregateKind,
    aggregate_id: i64,
) -> Result<StatusHistoryResponse, ApiError> {
    let entries: Vec<HistoryEntry> = persistence
        .get_status_history(kind, aggregate_id)
        .map_err(translate_persistence_error)?;

    Ok(StatusHistoryResponse {
        aggregate_kind: kind.as_str().to_string(),
        aggregate_id,
        entries: entries
            .iter()
            .map(|entry| HistoryEntryInfo {
                previous_status: entry.previous_status.clone(),
                new_status: entry.new_status.clone(),
                actor_id: entry.actor.id,
                actor_role: entry.actor.role.clone(),
                comment: entry.comment.clone(),
                recorded_at: entry.recorded_at.clone(),
            })
            .collect(),
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status transition computation for both workflow aggregates.
//!
//! Both aggregates share the same transition mechanics: check the target
//! against the static legal-edge table, then return the updated aggregate
//! plus the single history entry to append. A transition never triggers any
//! other side effect.

use crate::error::CoreError;
use bidflow_domain::{BiddingProcess, DomainError, ProcessStatus, PurchaseRequest, RequestStatus};
use bidflow_history::{Actor, AggregateKind, HistoryEntry};

/// The effects of one purchase request status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTransition {
    /// The request with its new status applied.
    pub request: PurchaseRequest,
    /// The status the request must still hold at commit time.
    pub previous_status: RequestStatus,
    /// The history entry recording the transition.
    pub entry: HistoryEntry,
}

/// The effects of one bidding process status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTransition {
    /// The process with its new status applied.
    pub process: BiddingProcess,
    /// The status the process must still hold at commit time.
    pub previous_status: ProcessStatus,
    /// The history entry recording the transition.
    pub entry: HistoryEntry,
}

/// Computes a purchase request status transition.
///
/// Moving to `approved` records the request's estimated total as its
/// approved total.
///
/// # Arguments
///
/// * `request` - The request in its current state
/// * `target` - The requested status
/// * `actor` - The actor performing the transition
/// * `comment` - Optional free-text comment for the history entry
/// * `recorded_at` - RFC 3339 timestamp for the history entry
///
/// # Errors
///
/// Returns an error if:
/// - The request has no persisted id
/// - The target is not in the legal-edge table for the current status
pub fn transition_request(
    request: &PurchaseRequest,
    target: RequestStatus,
    actor: &Actor,
    comment: Option<String>,
    recorded_at: &str,
) -> Result<RequestTransition, CoreError> {
    let request_id: i64 = request.id.ok_or(CoreError::DomainViolation(
        DomainError::MissingId {
            kind: "Purchase request",
        },
    ))?;

    let previous_status: RequestStatus = request.status;
    previous_status.validate_transition(target)?;

    let mut updated: PurchaseRequest = request.clone();
    updated.status = target;
    if target == RequestStatus::Approved {
        updated.approved_total = Some(request.estimated_total());
    }

    let entry = HistoryEntry::new(
        AggregateKind::PurchaseRequest,
        request_id,
        previous_status.as_str().to_string(),
        target.as_str().to_string(),
        actor.clone(),
        comment,
        recorded_at.to_string(),
    );

    Ok(RequestTransition {
        request: updated,
        previous_status,
        entry,
    })
}

/// Computes a bidding process status transition.
///
/// Opening a process does not mutate its source purchase requests; those
/// already moved when consolidation committed.
///
/// # Arguments
///
/// * `process` - The process in its current state
/// * `target` - The requested status
/// * `actor` - The actor performing the transition
/// * `comment` - Optional free-text comment for the history entry
/// * `recorded_at` - RFC 3339 timestamp for the history entry
///
/// # Errors
///
/// Returns an error if:
/// - The process has no persisted id
/// - The target is not in the legal-edge table for the current status
pub fn transition_process(
    process: &BiddingProcess,
    target: ProcessStatus,
    actor: &Actor,
    comment: Option<String>,
    recorded_at: &str,
) -> Result<ProcessTransition, CoreError> {
    let process_id: i64 = process.id.ok_or(CoreError::DomainViolation(
        DomainError::MissingId {
            kind: "Bidding process",
        },
    ))?;

    let previous_status: ProcessStatus = process.status;
    previous_status.validate_transition(target)?;

    let mut updated: BiddingProcess = process.clone();
    updated.status = target;

    let entry = HistoryEntry::new(
        AggregateKind::BiddingProcess,
        process_id,
        previous_status.as_str().to_string(),
        target.as_str().to_string(),
        actor.clone(),
        comment,
        recorded_at.to_string(),
    );

    Ok(ProcessTransition {
        process: updated,
        previous_status,
        entry,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status transition commits.
//!
//! A transition is computed against an in-memory snapshot and committed
//! here. The status column is re-read inside the transaction; if another
//! writer moved the aggregate in between, the commit fails with
//! `StaleStatus` and nothing is written.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use bidflow::{ProcessTransition, RequestTransition};

use crate::diesel_schema::{bidding_processes, purchase_requests};
use crate::error::PersistenceError;
use crate::mutations::history::insert_history_entry;

/// Commits a purchase request status transition.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The computed transition to commit
///
/// # Returns
///
/// The history row id of the recorded transition.
///
/// # Errors
///
/// Returns an error if the request does not exist, its status changed
/// since the transition was computed, or the database operation fails.
pub fn persist_request_transition(
    conn: &mut SqliteConnection,
    transition: &RequestTransition,
) -> Result<i64, PersistenceError> {
    let request_id: i64 = transition.entry.aggregate_id;
    let expected: &str = transition.previous_status.as_str();

    let history_id: i64 = conn.immediate_transaction(|conn| {
        let current: String = purchase_requests::table
            .filter(purchase_requests::request_id.eq(request_id))
            .select(purchase_requests::status)
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::RequestNotFound(request_id))?;

        if current != expected {
            return Err(PersistenceError::StaleStatus {
                kind: "Purchase request".to_string(),
                id: request_id,
                expected: expected.to_string(),
                actual: current,
            });
        }

        let approved_total: Option<String> =
            transition.request.approved_total.map(|total| total.to_string());

        diesel::update(
            purchase_requests::table.filter(purchase_requests::request_id.eq(request_id)),
        )
        .set((
            purchase_requests::status.eq(transition.request.status.as_str()),
            purchase_requests::approved_total.eq(approved_total),
        ))
        .execute(conn)?;

        let history_id: i64 = insert_history_entry(conn, &transition.entry)?;
        debug!(request_id, history_id, "Updated request status");

        Ok::<i64, PersistenceError>(history_id)
    })?;

    info!(
        request_id,
        from = expected,
        to = transition.request.status.as_str(),
        "Committed request transition"
    );
    Ok(history_id)
}

/// Commits a bidding process status transition.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The computed transition to commit
///
/// # Returns
///
/// The history row id of the recorded transition.
///
/// # Errors
///
/// Returns an error if the process does not exist, its status changed
/// since the transition was computed, or the database operation fails.
pub fn persist_process_transition(
    conn: &mut SqliteConnection,
    transition: &ProcessTransition,
) -> Result<i64, PersistenceError> {
    let process_id: i64 = transition.entry.aggregate_id;
    let expected: &str = transition.previous_status.as_str();

    let history_id: i64 = conn.immediate_transaction(|conn| {
        let current: String = bidding_processes::table
            .filter(bidding_processes::process_id.eq(process_id))
            .select(bidding_processes::status)
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::ProcessNotFound(process_id))?;

        if current != expected {
            return Err(PersistenceError::StaleStatus {
                kind: "Bidding process".to_string(),
                id: process_id,
                expected: expected.to_string(),
                actual: current,
            });
        }

        diesel::update(
            bidding_processes::table.filter(bidding_processes::process_id.eq(process_id)),
        )
        .set(bidding_processes::status.eq(transition.process.status.as_str()))
        .execute(conn)?;

        let history_id: i64 = insert_history_entry(conn, &transition.entry)?;
        debug!(process_id, history_id, "Updated process status");

        Ok::<i64, PersistenceError>(history_id)
    })?;

    info!(
        process_id,
        from = expected,
        to = transition.process.status.as_str(),
        "Committed process transition"
    );
    Ok(history_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic consolidation commits.
//!
//! A consolidation plan is computed in memory against a snapshot of the
//! selected purchase requests. Committing it creates the bidding process,
//! its consolidated items and source links, relinks every source request,
//! and records the history entries in one transaction. If any source
//! request changed status since the plan was computed, the whole commit
//! fails with `StaleStatus` and no rows are written.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use bidflow::ConsolidationPlan;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewBiddingProcess, NewConsolidatedItem, NewConsolidatedItemSource};
use crate::diesel_schema::{bidding_processes, consolidated_item_sources, consolidated_items, purchase_requests};
use crate::error::PersistenceError;
use crate::mutations::history::insert_history_entry;

/// Commits a consolidation plan.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan` - The plan to commit
///
/// # Returns
///
/// The generated bidding process id.
///
/// # Errors
///
/// Returns an error if a source request is missing or changed status
/// since the plan was computed, or if any database operation fails.
pub fn persist_consolidation(
    conn: &mut SqliteConnection,
    plan: &ConsolidationPlan,
) -> Result<i64, PersistenceError> {
    let process_id: i64 = conn.immediate_transaction(|conn| {
        // Re-validate every source request before writing anything.
        for relink in &plan.relinks {
            let current: String = purchase_requests::table
                .filter(purchase_requests::request_id.eq(relink.request_id))
                .select(purchase_requests::status)
                .first(conn)
                .optional()?
                .ok_or(PersistenceError::RequestNotFound(relink.request_id))?;

            if current != relink.previous_status.as_str() {
                return Err(PersistenceError::StaleStatus {
                    kind: "Purchase request".to_string(),
                    id: relink.request_id,
                    expected: relink.previous_status.as_str().to_string(),
                    actual: current,
                });
            }
        }

        let process_record = NewBiddingProcess {
            title: plan.process.title.clone(),
            status: plan.process.status.as_str().to_string(),
            observations: plan.process.observations.clone(),
            created_by: plan.process.created_by,
        };

        diesel::insert_into(bidding_processes::table)
            .values(&process_record)
            .execute(conn)?;
        let process_id: i64 = get_last_insert_rowid(conn)?;

        for (position, item) in plan.process.items.iter().enumerate() {
            let position: i32 = i32::try_from(position).map_err(|_| {
                PersistenceError::Other("Consolidated item position out of range".to_string())
            })?;

            let item_record = NewConsolidatedItem {
                process_id,
                position,
                description: item.description.clone(),
                unit: item.unit.clone(),
                total_quantity: item.total_quantity.to_string(),
                unit_price: item.unit_price.to_string(),
            };
            diesel::insert_into(consolidated_items::table)
                .values(&item_record)
                .execute(conn)?;
            let item_id: i64 = get_last_insert_rowid(conn)?;

            let source_records: Vec<NewConsolidatedItemSource> = item
                .source_request_ids
                .iter()
                .map(|request_id| NewConsolidatedItemSource {
                    item_id,
                    request_id: *request_id,
                })
                .collect();
            diesel::insert_into(consolidated_item_sources::table)
                .values(&source_records)
                .execute(conn)?;
        }

        for relink in &plan.relinks {
            diesel::update(
                purchase_requests::table
                    .filter(purchase_requests::request_id.eq(relink.request_id)),
            )
            .set((
                purchase_requests::status.eq(relink.new_status.as_str()),
                purchase_requests::bidding_process_id.eq(Some(process_id)),
            ))
            .execute(conn)?;

            let history_id: i64 = insert_history_entry(conn, &relink.entry)?;
            debug!(
                request_id = relink.request_id,
                history_id, "Relinked source request"
            );
        }

        Ok::<i64, PersistenceError>(process_id)
    })?;

    info!(
        process_id,
        item_count = plan.process.items.len(),
        source_count = plan.relinks.len(),
        "Committed consolidation"
    );
    Ok(process_id)
}

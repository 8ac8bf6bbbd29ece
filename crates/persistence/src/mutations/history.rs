// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status history inserts.
//!
//! History rows are append-only. Nothing in this crate updates or
//! deletes them once written.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use bidflow_history::HistoryEntry;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewStatusHistory;
use crate::diesel_schema::status_history;
use crate::error::PersistenceError;

/// Inserts a status history entry.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The history entry to insert
///
/// # Returns
///
/// The generated history row id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_history_entry(
    conn: &mut SqliteConnection,
    entry: &HistoryEntry,
) -> Result<i64, PersistenceError> {
    let record = NewStatusHistory {
        aggregate_kind: entry.kind.as_str().to_string(),
        aggregate_id: entry.aggregate_id,
        previous_status: entry.previous_status.clone(),
        new_status: entry.new_status.clone(),
        actor_id: entry.actor.id,
        actor_role: entry.actor.role.clone(),
        comment: entry.comment.clone(),
        recorded_at: entry.recorded_at.clone(),
    };

    diesel::insert_into(status_history::table)
        .values(&record)
        .execute(conn)?;

    let history_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        history_id,
        aggregate_kind = entry.kind.as_str(),
        aggregate_id = entry.aggregate_id,
        "Inserted status history entry"
    );
    Ok(history_id)
}

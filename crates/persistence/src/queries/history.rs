// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status history queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use bidflow_history::{Actor, AggregateKind, HistoryEntry};

use crate::data_models::StatusHistoryRow;
use crate::diesel_schema::status_history;
use crate::error::PersistenceError;

/// Retrieves the status history of an aggregate in recording order.
///
/// Returns an empty timeline for an aggregate with no recorded
/// transitions; creation itself writes no entry.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - The aggregate kind
/// * `aggregate_id` - The aggregate's row id
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn get_status_history(
    conn: &mut SqliteConnection,
    kind: AggregateKind,
    aggregate_id: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<StatusHistoryRow> = status_history::table
        .filter(status_history::aggregate_kind.eq(kind.as_str()))
        .filter(status_history::aggregate_id.eq(aggregate_id))
        .order(status_history::history_id.asc())
        .load::<StatusHistoryRow>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            HistoryEntry::new(
                kind,
                row.aggregate_id,
                row.previous_status,
                row.new_status,
                Actor::new(row.actor_id, row.actor_role),
                row.comment,
                row.recorded_at,
            )
        })
        .collect())
}

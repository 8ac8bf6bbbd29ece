// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bidding process queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use bidflow_domain::{BiddingProcess, ConsolidatedItem, ProcessStatus};

use crate::data_models::{
    BiddingProcessRow, ConsolidatedItemRow, parse_decimal, parse_process_status,
};
use crate::diesel_schema::{bidding_processes, consolidated_item_sources, consolidated_items, purchase_requests};
use crate::error::PersistenceError;

/// Retrieves a bidding process with its consolidated items and source links.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `process_id` - The process to load
///
/// # Errors
///
/// Returns an error if the process does not exist or a stored row cannot
/// be mapped back to a domain value.
pub fn get_bidding_process(
    conn: &mut SqliteConnection,
    process_id: i64,
) -> Result<BiddingProcess, PersistenceError> {
    let row: BiddingProcessRow = bidding_processes::table
        .filter(bidding_processes::process_id.eq(process_id))
        .first::<BiddingProcessRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ProcessNotFound(process_id))?;

    let status: ProcessStatus = parse_process_status(&row.status)?;

    let item_rows: Vec<ConsolidatedItemRow> = consolidated_items::table
        .filter(consolidated_items::process_id.eq(process_id))
        .order(consolidated_items::position.asc())
        .load::<ConsolidatedItemRow>(conn)?;

    let mut items: Vec<ConsolidatedItem> = Vec::with_capacity(item_rows.len());
    for item_row in item_rows {
        let source_request_ids: Vec<i64> = consolidated_item_sources::table
            .filter(consolidated_item_sources::item_id.eq(item_row.item_id))
            .select(consolidated_item_sources::request_id)
            .order(consolidated_item_sources::request_id.asc())
            .load::<i64>(conn)?;

        items.push(ConsolidatedItem {
            description: item_row.description,
            unit: item_row.unit,
            total_quantity: parse_decimal("total_quantity", &item_row.total_quantity)?,
            unit_price: parse_decimal("unit_price", &item_row.unit_price)?,
            source_request_ids,
        });
    }

    Ok(BiddingProcess::with_id(
        row.process_id,
        row.title,
        status,
        items,
        row.observations,
        row.created_by,
    ))
}

/// Lists the ids of the purchase requests linked to a bidding process.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `process_id` - The process whose sources to list
///
/// # Errors
///
/// Returns an error if the process does not exist or the database cannot
/// be queried.
pub fn list_source_request_ids(
    conn: &mut SqliteConnection,
    process_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    let exists: i64 = bidding_processes::table
        .filter(bidding_processes::process_id.eq(process_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::ProcessNotFound(process_id));
    }

    Ok(purchase_requests::table
        .filter(purchase_requests::bidding_process_id.eq(Some(process_id)))
        .select(purchase_requests::request_id)
        .order(purchase_requests::request_id.asc())
        .load::<i64>(conn)?)
}

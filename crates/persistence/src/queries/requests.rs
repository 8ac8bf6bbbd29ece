// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase request queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use bidflow_domain::{LineItem, PurchaseRequest, RequestStatus};

use crate::data_models::{
    LineItemRow, PurchaseRequestRow, parse_decimal, parse_request_status,
};
use crate::diesel_schema::{line_items, purchase_requests};
use crate::error::PersistenceError;

/// Reconstructs a purchase request from its row and line item rows.
fn reconstruct_request(
    row: PurchaseRequestRow,
    item_rows: Vec<LineItemRow>,
) -> Result<PurchaseRequest, PersistenceError> {
    let status: RequestStatus = parse_request_status(&row.status)?;

    let approved_total: Option<Decimal> = row
        .approved_total
        .as_deref()
        .map(|text| parse_decimal("approved_total", text))
        .transpose()?;

    let mut items: Vec<LineItem> = Vec::with_capacity(item_rows.len());
    for item_row in item_rows {
        items.push(LineItem::new(
            item_row.description,
            item_row.unit,
            parse_decimal("quantity", &item_row.quantity)?,
            parse_decimal("unit_price", &item_row.unit_price)?,
        ));
    }

    Ok(PurchaseRequest::with_id(
        row.request_id,
        row.title,
        row.description,
        row.department,
        row.created_by,
        status,
        items,
        approved_total,
        row.bidding_process_id,
    ))
}

/// Loads the line item rows for a request in stored order.
fn load_line_items(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Vec<LineItemRow>, PersistenceError> {
    Ok(line_items::table
        .filter(line_items::request_id.eq(request_id))
        .order(line_items::position.asc())
        .load::<LineItemRow>(conn)?)
}

/// Retrieves a purchase request with its line items.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request_id` - The request to load
///
/// # Errors
///
/// Returns an error if the request does not exist or a stored row cannot
/// be mapped back to a domain value.
pub fn get_purchase_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<PurchaseRequest, PersistenceError> {
    let row: PurchaseRequestRow = purchase_requests::table
        .filter(purchase_requests::request_id.eq(request_id))
        .first::<PurchaseRequestRow>(conn)
        .optional()?
        .ok_or(PersistenceError::RequestNotFound(request_id))?;

    let item_rows: Vec<LineItemRow> = load_line_items(conn, request_id)?;
    reconstruct_request(row, item_rows)
}

/// Lists purchase requests in a given status, ordered by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `status` - The status to filter on
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored row
/// cannot be mapped back to a domain value.
pub fn list_requests_by_status(
    conn: &mut SqliteConnection,
    status: RequestStatus,
) -> Result<Vec<PurchaseRequest>, PersistenceError> {
    let rows: Vec<PurchaseRequestRow> = purchase_requests::table
        .filter(purchase_requests::status.eq(status.as_str()))
        .order(purchase_requests::request_id.asc())
        .load::<PurchaseRequestRow>(conn)?;

    let mut requests: Vec<PurchaseRequest> = Vec::with_capacity(rows.len());
    for row in rows {
        let item_rows: Vec<LineItemRow> = load_line_items(conn, row.request_id)?;
        requests.push(reconstruct_request(row, item_rows)?);
    }
    Ok(requests)
}

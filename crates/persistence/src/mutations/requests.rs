// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase request and line item mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use bidflow_domain::{
    DomainError, LineItem, PurchaseRequest, RequestStatus, validate_line_item, validate_title,
};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewLineItem, NewPurchaseRequest};
use crate::diesel_schema::{bidding_processes, line_items, purchase_requests};
use crate::error::PersistenceError;

/// Checks the intrinsic line item constraints before anything is written.
///
/// A request owns at least one item, and every item carries a non-blank
/// description and unit, a strictly positive quantity, and a non-negative
/// unit price.
fn validate_items(items: &[LineItem]) -> Result<(), PersistenceError> {
    if items.is_empty() {
        return Err(PersistenceError::DomainViolation(
            DomainError::EmptyLineItems,
        ));
    }
    for item in items {
        validate_line_item(item)?;
    }
    Ok(())
}

/// Builds insertable line item rows for a request, preserving input order.
fn line_item_rows(
    request_id: i64,
    items: &[LineItem],
) -> Result<Vec<NewLineItem>, PersistenceError> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let position: i32 = i32::try_from(position)
                .map_err(|_| PersistenceError::Other("Line item position out of range".to_string()))?;
            Ok(NewLineItem {
                request_id,
                position,
                description: item.description.clone(),
                unit: item.unit.clone(),
                quantity: item.quantity.to_string(),
                unit_price: item.unit_price.to_string(),
            })
        })
        .collect()
}

/// Inserts a new purchase request with its line items.
///
/// Runs inside an immediate transaction so the request row and its line
/// items appear together.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request` - The request to insert (its `id` is ignored)
///
/// # Returns
///
/// The generated request id.
///
/// # Errors
///
/// Returns an error if the title or line items fail validation, or the
/// database insert fails.
pub fn insert_purchase_request(
    conn: &mut SqliteConnection,
    request: &PurchaseRequest,
) -> Result<i64, PersistenceError> {
    validate_title(&request.title)?;
    validate_items(&request.line_items)?;

    let record = NewPurchaseRequest {
        title: request.title.clone(),
        description: request.description.clone(),
        department: request.department.clone(),
        created_by: request.created_by,
        status: request.status.as_str().to_string(),
    };

    let request_id: i64 = conn.immediate_transaction(|conn| {
        diesel::insert_into(purchase_requests::table)
            .values(&record)
            .execute(conn)?;

        let request_id: i64 = get_last_insert_rowid(conn)?;

        diesel::insert_into(line_items::table)
            .values(&line_item_rows(request_id, &request.line_items)?)
            .execute(conn)?;

        Ok::<i64, PersistenceError>(request_id)
    })?;

    info!(
        request_id,
        item_count = request.line_items.len(),
        "Inserted purchase request"
    );
    Ok(request_id)
}

/// Replaces the full line item set of a draft purchase request.
///
/// The request's status is re-read inside the transaction; anything other
/// than `draft` locks the item list.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request_id` - The purchase request to update
/// * `items` - The replacement line items
///
/// # Errors
///
/// Returns an error if the replacement items fail validation, the request
/// does not exist, is not in `draft`, or the database operation fails.
pub fn replace_line_items(
    conn: &mut SqliteConnection,
    request_id: i64,
    items: &[LineItem],
) -> Result<(), PersistenceError> {
    validate_items(items)?;

    conn.immediate_transaction(|conn| {
        let status: String = purchase_requests::table
            .filter(purchase_requests::request_id.eq(request_id))
            .select(purchase_requests::status)
            .first(conn)
            .optional()?
            .ok_or(PersistenceError::RequestNotFound(request_id))?;

        if status != RequestStatus::Draft.as_str() {
            return Err(PersistenceError::RequestLocked { request_id, status });
        }

        diesel::delete(line_items::table.filter(line_items::request_id.eq(request_id)))
            .execute(conn)?;

        diesel::insert_into(line_items::table)
            .values(&line_item_rows(request_id, items)?)
            .execute(conn)?;

        Ok::<(), PersistenceError>(())
    })?;

    debug!(
        request_id,
        item_count = items.len(),
        "Replaced line items"
    );
    Ok(())
}

/// Updates the free-text observations of a bidding process.
///
/// Observations remain editable in every non-terminal status; title and
/// items never change after creation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `process_id` - The bidding process to update
/// * `observations` - The new observations text (or `None` to clear)
///
/// # Errors
///
/// Returns an error if the process does not exist or the update fails.
pub fn update_process_observations(
    conn: &mut SqliteConnection,
    process_id: i64,
    observations: Option<&str>,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(
        bidding_processes::table.filter(bidding_processes::process_id.eq(process_id)),
    )
    .set(bidding_processes::observations.eq(observations))
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ProcessNotFound(process_id));
    }

    debug!(process_id, "Updated process observations");
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mapping between the database schema and domain types.
//!
//! Decimal columns are stored as TEXT and parsed back into exact decimals
//! on read. Status columns store the canonical snake_case strings.

use bidflow_domain::{ProcessStatus, RequestStatus};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::diesel_schema::{
    bidding_processes, consolidated_item_sources, consolidated_items, line_items,
    purchase_requests, status_history,
};
use crate::error::PersistenceError;

/// Parses a TEXT decimal column back into an exact decimal.
///
/// # Errors
///
/// Returns a reconstruction error if the stored text is not a valid decimal.
pub fn parse_decimal(column: &str, text: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(text).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid decimal in {column}: {e}"))
    })
}

/// Parses a stored purchase request status string.
///
/// # Errors
///
/// Returns a reconstruction error if the stored text is not a known status.
pub fn parse_request_status(text: &str) -> Result<RequestStatus, PersistenceError> {
    RequestStatus::from_str(text).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// Parses a stored bidding process status string.
///
/// # Errors
///
/// Returns a reconstruction error if the stored text is not a known status.
pub fn parse_process_status(text: &str) -> Result<ProcessStatus, PersistenceError> {
    ProcessStatus::from_str(text).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

#[derive(Debug, Clone, Queryable)]
pub struct PurchaseRequestRow {
    pub request_id: i64,
    pub title: String,
    pub description: String,
    pub department: String,
    pub created_by: i64,
    pub status: String,
    pub approved_total: Option<String>,
    pub bidding_process_id: Option<i64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = purchase_requests)]
pub struct NewPurchaseRequest {
    pub title: String,
    pub description: String,
    pub department: String,
    pub created_by: i64,
    pub status: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct LineItemRow {
    pub line_item_id: i64,
    pub request_id: i64,
    pub position: i32,
    pub description: String,
    pub unit: String,
    pub quantity: String,
    pub unit_price: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = line_items)]
pub struct NewLineItem {
    pub request_id: i64,
    pub position: i32,
    pub description: String,
    pub unit: String,
    pub quantity: String,
    pub unit_price: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct BiddingProcessRow {
    pub process_id: i64,
    pub title: String,
    pub status: String,
    pub observations: Option<String>,
    pub created_by: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bidding_processes)]
pub struct NewBiddingProcess {
    pub title: String,
    pub status: String,
    pub observations: Option<String>,
    pub created_by: i64,
}

#[derive(Debug, Clone, Queryable)]
pub struct ConsolidatedItemRow {
    pub item_id: i64,
    pub process_id: i64,
    pub position: i32,
    pub description: String,
    pub unit: String,
    pub total_quantity: String,
    pub unit_price: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = consolidated_items)]
pub struct NewConsolidatedItem {
    pub process_id: i64,
    pub position: i32,
    pub description: String,
    pub unit: String,
    pub total_quantity: String,
    pub unit_price: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = consolidated_item_sources)]
pub struct NewConsolidatedItemSource {
    pub item_id: i64,
    pub request_id: i64,
}

#[derive(Debug, Clone, Queryable)]
pub struct StatusHistoryRow {
    pub history_id: i64,
    pub aggregate_kind: String,
    pub aggregate_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub actor_id: i64,
    pub actor_role: String,
    pub comment: Option<String>,
    pub recorded_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = status_history)]
pub struct NewStatusHistory {
    pub aggregate_kind: String,
    pub aggregate_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub actor_id: i64,
    pub actor_role: String,
    pub comment: Option<String>,
    pub recorded_at: String,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the BidFlow procurement workflow.
//!
//! This crate stores purchase requests, bidding processes, and the
//! append-only status history. It is built on Diesel over `SQLite`.
//!
//! ## Write serialization
//!
//! Every multi-row mutation runs inside an immediate transaction, so
//! concurrent writers queue rather than interleave. Commits that change
//! an aggregate's status re-read the status column inside the
//! transaction and fail with [`PersistenceError::StaleStatus`] if another
//! writer moved the aggregate after the caller's snapshot was taken.
//! Callers are expected to re-read and re-plan on that error.
//!
//! ## Decimal storage
//!
//! Quantities, prices, and totals are stored as TEXT and parsed back
//! into exact decimals on read. Floating point never touches a money
//! column.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases. Each
//! `new_in_memory()` call receives a fresh database via an atomic
//! counter, so parallel tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use bidflow::{ConsolidationPlan, ProcessTransition, RequestTransition};
use bidflow_domain::{BiddingProcess, LineItem, PurchaseRequest, RequestStatus};
use bidflow_history::{AggregateKind, HistoryEntry};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for the procurement workflow store.
///
/// Owns a single `SQLite` connection. All public operations either
/// complete fully or leave the database untouched.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Purchase Requests
    // ========================================================================

    /// Persists a new purchase request with its line items.
    ///
    /// # Arguments
    ///
    /// * `request` - The request to persist (its `id` is ignored)
    ///
    /// # Returns
    ///
    /// The generated request id.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_purchase_request(
        &mut self,
        request: &PurchaseRequest,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_purchase_request(&mut self.conn, request)
    }

    /// Retrieves a purchase request with its line items.
    ///
    /// # Arguments
    ///
    /// * `request_id` - The request to load
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or cannot be
    /// reconstructed.
    pub fn get_purchase_request(
        &mut self,
        request_id: i64,
    ) -> Result<PurchaseRequest, PersistenceError> {
        queries::get_purchase_request(&mut self.conn, request_id)
    }

    /// Lists purchase requests in a given status, ordered by id.
    ///
    /// # Arguments
    ///
    /// * `status` - The status to filter on
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_requests_by_status(
        &mut self,
        status: RequestStatus,
    ) -> Result<Vec<PurchaseRequest>, PersistenceError> {
        queries::list_requests_by_status(&mut self.conn, status)
    }

    /// Replaces the full line item set of a draft purchase request.
    ///
    /// # Arguments
    ///
    /// * `request_id` - The purchase request to update
    /// * `items` - The replacement line items
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or has left `draft`.
    pub fn replace_line_items(
        &mut self,
        request_id: i64,
        items: &[LineItem],
    ) -> Result<(), PersistenceError> {
        mutations::replace_line_items(&mut self.conn, request_id, items)
    }

    // ========================================================================
    // Consolidation & Transitions
    // ========================================================================

    /// Commits a consolidation plan atomically.
    ///
    /// Creates the bidding process with its consolidated items, relinks
    /// every source request, and records the history entries. Fails
    /// without writing anything if a source request changed status since
    /// the plan was computed.
    ///
    /// # Arguments
    ///
    /// * `plan` - The plan to commit
    ///
    /// # Returns
    ///
    /// The generated bidding process id.
    ///
    /// # Errors
    ///
    /// Returns an error if a source request is missing or stale, or if
    /// persistence fails.
    pub fn persist_consolidation(
        &mut self,
        plan: &ConsolidationPlan,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_consolidation(&mut self.conn, plan)
    }

    /// Commits a purchase request status transition.
    ///
    /// # Arguments
    ///
    /// * `transition` - The computed transition to commit
    ///
    /// # Returns
    ///
    /// The history row id of the recorded transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is missing or stale, or if
    /// persistence fails.
    pub fn persist_request_transition(
        &mut self,
        transition: &RequestTransition,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_request_transition(&mut self.conn, transition)
    }

    /// Commits a bidding process status transition.
    ///
    /// # Arguments
    ///
    /// * `transition` - The computed transition to commit
    ///
    /// # Returns
    ///
    /// The history row id of the recorded transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the process is missing or stale, or if
    /// persistence fails.
    pub fn persist_process_transition(
        &mut self,
        transition: &ProcessTransition,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_process_transition(&mut self.conn, transition)
    }

    // ========================================================================
    // Bidding Processes
    // ========================================================================

    /// Retrieves a bidding process with its consolidated items.
    ///
    /// # Arguments
    ///
    /// * `process_id` - The process to load
    ///
    /// # Errors
    ///
    /// Returns an error if the process does not exist or cannot be
    /// reconstructed.
    pub fn get_bidding_process(
        &mut self,
        process_id: i64,
    ) -> Result<BiddingProcess, PersistenceError> {
        queries::get_bidding_process(&mut self.conn, process_id)
    }

    /// Lists the ids of the purchase requests linked to a bidding process.
    ///
    /// # Arguments
    ///
    /// * `process_id` - The process whose sources to list
    ///
    /// # Errors
    ///
    /// Returns an error if the process does not exist.
    pub fn list_source_request_ids(
        &mut self,
        process_id: i64,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::list_source_request_ids(&mut self.conn, process_id)
    }

    /// Updates the free-text observations of a bidding process.
    ///
    /// # Arguments
    ///
    /// * `process_id` - The bidding process to update
    /// * `observations` - The new observations text (or `None` to clear)
    ///
    /// # Errors
    ///
    /// Returns an error if the process does not exist.
    pub fn update_process_observations(
        &mut self,
        process_id: i64,
        observations: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::update_process_observations(&mut self.conn, process_id, observations)
    }

    // ========================================================================
    // Status History
    // ========================================================================

    /// Retrieves the status history of an aggregate in recording order.
    ///
    /// # Arguments
    ///
    /// * `kind` - The aggregate kind
    /// * `aggregate_id` - The aggregate's row id
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn get_status_history(
        &mut self,
        kind: AggregateKind,
        aggregate_id: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::get_status_history(&mut self.conn, kind, aggregate_id)
    }
}

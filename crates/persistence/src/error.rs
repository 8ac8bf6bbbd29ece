// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bidflow_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The payload violated a domain rule before anything was written.
    DomainViolation(DomainError),
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// The requested purchase request was not found.
    RequestNotFound(i64),
    /// The requested bidding process was not found.
    ProcessNotFound(i64),
    /// The aggregate changed status between planning and commit.
    StaleStatus {
        /// The aggregate kind string.
        kind: String,
        /// The aggregate's row id.
        id: i64,
        /// The status the plan was computed against.
        expected: String,
        /// The status found at commit time.
        actual: String,
    },
    /// Line items cannot be replaced once the request has left draft.
    RequestLocked {
        /// The purchase request id.
        request_id: i64,
        /// The request's current status.
        status: String,
    },
    /// Stored row data could not be mapped back to a domain value.
    ReconstructionError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::RequestNotFound(id) => write!(f, "Purchase request not found: {id}"),
            Self::ProcessNotFound(id) => write!(f, "Bidding process not found: {id}"),
            Self::StaleStatus {
                kind,
                id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{kind} {id} changed status: expected '{expected}', found '{actual}'"
                )
            }
            Self::RequestLocked { request_id, status } => {
                write!(
                    f,
                    "Purchase request {request_id} is '{status}': line items are locked"
                )
            }
            Self::ReconstructionError(msg) => write!(f, "Reconstruction error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API error taxonomy and translation from the inner layers.
//!
//! Every failure surfaced to a caller is one of exactly five kinds. Domain,
//! core, and persistence errors are translated explicitly here so inner
//! error types never leak through the boundary.

use bidflow::CoreError;
use bidflow_domain::DomainError;
use bidflow_persistence::PersistenceError;

use crate::input::InputError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The input violated a domain rule or failed to parse.
    Validation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A referenced aggregate does not exist.
    NotFound {
        /// The resource type that was looked up.
        resource: String,
        /// A human-readable description of the lookup.
        message: String,
    },
    /// The requested status transition is not in the legal-edge table.
    IllegalTransition {
        /// The aggregate's current status.
        from: String,
        /// The requested status.
        to: String,
        /// The statuses legally reachable from `from`.
        allowed: Vec<String>,
    },
    /// The actor's role does not permit the action.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role or condition required for this action.
        required_role: String,
    },
    /// The backing store failed. The operation wrote nothing and is safe
    /// to retry.
    Persistence {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "Validation error: {message}"),
            Self::NotFound { resource, message } => {
                write!(f, "{resource} not found: {message}")
            }
            Self::IllegalTransition { from, to, allowed } => {
                write!(
                    f,
                    "Illegal transition from '{from}' to '{to}' (allowed: {})",
                    allowed.join(", ")
                )
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role}")
            }
            Self::Persistence { message } => write!(f, "Persistence error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::RequestNotFound(id) => ApiError::NotFound {
            resource: String::from("Purchase request"),
            message: format!("Purchase request {id} does not exist"),
        },
        DomainError::IllegalRequestTransition { from, to, allowed }
        | DomainError::IllegalProcessTransition { from, to, allowed } => {
            ApiError::IllegalTransition { from, to, allowed }
        }
        DomainError::InvalidTitle(_)
        | DomainError::InvalidObservations(_)
        | DomainError::InvalidItemDescription(_)
        | DomainError::InvalidUnitOfMeasure(_)
        | DomainError::InvalidQuantity { .. }
        | DomainError::InvalidUnitPrice { .. }
        | DomainError::EmptyLineItems
        | DomainError::EmptySelection
        | DomainError::InvalidRequestStatus(_)
        | DomainError::InvalidProcessStatus(_)
        | DomainError::InvalidAggregateKind(_)
        | DomainError::RequestNotEligible { .. }
        | DomainError::MissingId { .. } => ApiError::Validation {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(message) => ApiError::Persistence { message },
    }
}

/// Translates a persistence error into an API error.
///
/// Stale-status failures surface as validation errors: the aggregate moved
/// on since the caller last read it, which is a conflict with the caller's
/// view rather than a storage fault.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DomainViolation(err) => translate_domain_error(err),
        PersistenceError::RequestNotFound(id) => ApiError::NotFound {
            resource: String::from("Purchase request"),
            message: format!("Purchase request {id} does not exist"),
        },
        PersistenceError::ProcessNotFound(id) => ApiError::NotFound {
            resource: String::from("Bidding process"),
            message: format!("Bidding process {id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::NotFound {
            resource: String::from("Resource"),
            message,
        },
        PersistenceError::StaleStatus { .. } | PersistenceError::RequestLocked { .. } => {
            ApiError::Validation {
                message: err.to_string(),
            }
        }
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::Other(_) => ApiError::Persistence {
            message: err.to_string(),
        },
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based authorization for workflow operations.
//!
//! The authorizer is a pure function of (aggregate kind, actor role, target
//! status) plus the self-decision rule. Whether the transition is legal from
//! the aggregate's current status is the state machine's job, checked
//! separately by the workflow engine.

use bidflow_domain::{ProcessStatus, PurchaseRequest, RequestStatus};
use bidflow_history::Actor;
use std::str::FromStr;

use crate::error::ApiError;
use crate::input::InputError;

/// Actor roles for authorization.
///
/// Roles determine which workflow actions an actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Department staff who file purchase requests. May submit their own
    /// requests into price research but cannot run the procurement side.
    Requester,
    /// Procurement staff. May complete price research, consolidate, and
    /// drive bidding processes, but not issue final decisions.
    Buyer,
    /// Full authority, including final approval and rejection.
    Administrator,
}

impl Role {
    /// Returns the role label recorded in status history.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Buyer => "buyer",
            Self::Administrator => "administrator",
        }
    }

    /// Returns true for the roles with procurement authority.
    #[must_use]
    pub const fn is_procurement(&self) -> bool {
        matches!(self, Self::Buyer | Self::Administrator)
    }
}

impl FromStr for Role {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester" => Ok(Self::Requester),
            "buyer" => Ok(Self::Buyer),
            "administrator" => Ok(Self::Administrator),
            _ => Err(InputError::UnknownRole {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated actor with an associated role.
///
/// Authentication itself happens outside this crate; handlers receive the
/// already-established identity and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The actor's user id.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The actor's user id
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this actor into a history `Actor` for recording transitions.
    #[must_use]
    pub fn to_history_actor(&self) -> Actor {
        Actor::new(self.id, self.role.as_str().to_string())
    }
}

/// Enforces the role table for workflow operations.
pub struct TransitionAuthorizer;

impl TransitionAuthorizer {
    /// Checks whether an actor may move a purchase request to `target`.
    ///
    /// `in_bidding_process` is never reachable through a direct transition;
    /// only a consolidation commit moves requests there. Final decisions
    /// additionally apply the self-decision rule: the request's creator may
    /// never approve or reject their own request, regardless of role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the actor's role does not permit
    /// the target status.
    pub fn authorize_request_transition(
        actor: &AuthenticatedActor,
        request: &PurchaseRequest,
        target: RequestStatus,
    ) -> Result<(), ApiError> {
        match target {
            RequestStatus::Draft | RequestStatus::PriceResearch => Ok(()),
            RequestStatus::InBiddingProcess => Err(ApiError::Forbidden {
                action: String::from("move_request_into_bidding_process"),
                required_role: String::from("a consolidation commit"),
            }),
            RequestStatus::PriceResearchCompleted
            | RequestStatus::AwaitingSupplyAuthorization => {
                if actor.role.is_procurement() {
                    Ok(())
                } else {
                    Err(ApiError::Forbidden {
                        action: format!("transition_request_to_{}", target.as_str()),
                        required_role: String::from("the Buyer or Administrator role"),
                    })
                }
            }
            RequestStatus::Approved | RequestStatus::Rejected => {
                if actor.role != Role::Administrator {
                    return Err(ApiError::Forbidden {
                        action: format!("transition_request_to_{}", target.as_str()),
                        required_role: String::from("the Administrator role"),
                    });
                }
                if actor.id == request.created_by {
                    return Err(ApiError::Forbidden {
                        action: format!("transition_request_to_{}", target.as_str()),
                        required_role: String::from("an administrator other than the creator"),
                    });
                }
                Ok(())
            }
        }
    }

    /// Checks whether an actor may move a bidding process to `target`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the actor's role does not permit
    /// the target status.
    pub fn authorize_process_transition(
        actor: &AuthenticatedActor,
        target: ProcessStatus,
    ) -> Result<(), ApiError> {
        if actor.role.is_procurement() {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                action: format!("transition_process_to_{}", target.as_str()),
                required_role: String::from("the Buyer or Administrator role"),
            })
        }
    }

    /// Checks whether an actor may consolidate purchase requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the actor lacks procurement
    /// authority.
    pub fn authorize_consolidation(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_procurement() {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                action: String::from("consolidate_purchase_requests"),
                required_role: String::from("the Buyer or Administrator role"),
            })
        }
    }

    /// Checks whether an actor may edit a bidding process's observations.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the actor lacks procurement
    /// authority.
    pub fn authorize_observations_update(actor: &AuthenticatedActor) -> Result<(), ApiError> {
        if actor.role.is_procurement() {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                action: String::from("update_process_observations"),
                required_role: String::from("the Buyer or Administrator role"),
            })
        }
    }

    /// Returns the request statuses the actor may move this request to.
    ///
    /// The legal-edge table provides the candidates; the role table filters
    /// them. Used for computing "available actions" without attempting each
    /// transition.
    #[must_use]
    pub fn available_request_transitions(
        actor: &AuthenticatedActor,
        request: &PurchaseRequest,
    ) -> Vec<RequestStatus> {
        request
            .status
            .allowed_transitions()
            .iter()
            .copied()
            .filter(|&target| {
                Self::authorize_request_transition(actor, request, target).is_ok()
            })
            .collect()
    }

    /// Returns the process statuses the actor may move a process to.
    #[must_use]
    pub fn available_process_transitions(
        actor: &AuthenticatedActor,
        current: ProcessStatus,
    ) -> Vec<ProcessStatus> {
        current
            .allowed_transitions()
            .iter()
            .copied()
            .filter(|&target| Self::authorize_process_transition(actor, target).is_ok())
            .collect()
    }
}

//! Role-checked operations over the gateway.
//!
//! Views run these inside the mutation envelope; resolvers use the loaders to
//! pre-fetch page data. Each function re-checks the caller's capabilities even
//! though views hide the corresponding controls.

use thiserror::Error;

use crate::domain::role::RoleContext;
use crate::gateway::errors::GatewayError;
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::workflow::InvalidTransition;

pub mod auth;
pub mod feedback;
pub mod invoices;
pub mod notices;
pub mod profile;
pub mod service_requests;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not allowed for the current role")]
    Unauthorized,

    #[error("entity not found")]
    NotFound,

    #[error("invalid form: {0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    InvalidTransition(InvalidTransition),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ServiceError {
    /// The backend no longer accepts the session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ServiceError::Gateway(err) if err.is_unauthorized())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fails with [`ServiceError::Unauthorized`] unless `role` grants `capability`.
pub fn ensure_capability(role: &RoleContext, capability: Capability) -> ServiceResult<()> {
    if CapabilitySet::resolve(role).allows(capability) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Fails unless somebody is signed in.
pub fn ensure_signed_in(role: &RoleContext) -> ServiceResult<()> {
    match role.role {
        Some(_) => Ok(()),
        None => Err(ServiceError::Unauthorized),
    }
}

//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on service error types, so the
//! conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;
use crate::workflow::InvalidTransition;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<InvalidTransition> for ServiceError {
    fn from(val: InvalidTransition) -> Self {
        match val {
            InvalidTransition::NotPermitted(_) => ServiceError::Unauthorized,
            other => ServiceError::InvalidTransition(other),
        }
    }
}

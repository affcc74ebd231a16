//! Dialog drafts and page forms, validated and converted into domain payloads.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod feedback;
pub mod invoices;
pub mod notices;
pub mod profile;
pub mod service_requests;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("choose a time slot")]
    MissingSlot,

    #[error("nothing to update")]
    NothingToUpdate,

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// `None` for blank input, otherwise the trimmed value passed through `parse`.
pub(crate) fn optional<T, F>(value: &str, parse: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(&str) -> Result<T, TypeConstraintError>,
{
    let value = value.trim();
    if value.is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

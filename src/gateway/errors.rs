use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failures surfaced by the remote data gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend responded with HTTP {0}")]
    Status(u16),

    /// The backend answered with a `fail` envelope.
    #[error("{message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("response carried no data")]
    MissingData,
}

impl GatewayError {
    /// The backend refused the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Status(401))
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GatewayError::Status(status.as_u16()),
            None => GatewayError::Transport(err.to_string()),
        }
    }
}

impl From<TypeConstraintError> for GatewayError {
    fn from(err: TypeConstraintError) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

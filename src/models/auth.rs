//! Wire shapes of the `/login` endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::auth::{Credentials, LoginSession};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRecord {
    pub token: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<LoginRecord> for LoginSession {
    type Error = TypeConstraintError;

    fn try_from(record: LoginRecord) -> Result<Self, Self::Error> {
        if record.token.trim().is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self {
            token: record.token,
            email: record.email,
            role: record.role.parse()?,
        })
    }
}

/// Body of `POST /login`.
#[derive(Debug, Serialize, PartialEq)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl From<&Credentials> for LoginBody {
    fn from(credentials: &Credentials) -> Self {
        Self {
            email: credentials.email.as_str().to_string(),
            password: credentials.password.as_str().to_string(),
        }
    }
}

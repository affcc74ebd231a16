//! Login credentials and the session data the backend hands back.

use crate::domain::role::Role;
use crate::domain::types::{Email, Password};

#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

/// Token and identity returned by a successful login.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSession {
    pub token: String,
    pub email: String,
    pub role: Role,
}

//! Society roles and the per-view role context derived from the session.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Role assigned to the signed-in user by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Officer,
    Resident,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Officer => "officer",
            Role::Resident => "resident",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "officer" => Ok(Role::Officer),
            "resident" => Ok(Role::Resident),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role `{other}`"
            ))),
        }
    }
}

/// Read-only snapshot of the current role, taken once when a view activates.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct RoleContext {
    pub role: Option<Role>,
    pub is_admin: bool,
    pub is_officer: bool,
    pub is_resident: bool,
}

impl RoleContext {
    #[must_use]
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            is_admin: role == Some(Role::Admin),
            is_officer: role == Some(Role::Officer),
            is_resident: role == Some(Role::Resident),
        }
    }

    /// Admins and officers share the staff-side request controls.
    pub fn is_staff(&self) -> bool {
        self.is_admin || self.is_officer
    }
}

impl From<Role> for RoleContext {
    fn from(role: Role) -> Self {
        Self::new(Some(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" officer ".parse::<Role>(), Ok(Role::Officer));
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn context_flags_follow_role() {
        let ctx = RoleContext::from(Role::Officer);
        assert!(ctx.is_officer && ctx.is_staff());
        assert!(!ctx.is_admin && !ctx.is_resident);

        let anonymous = RoleContext::new(None);
        assert!(!anonymous.is_staff() && !anonymous.is_resident);
    }
}

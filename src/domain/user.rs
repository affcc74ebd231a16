//! Society members: residents, officers and the signed-in user's own profile.

use serde::Serialize;

use crate::domain::types::{Email, FlatNumber, Password, PersonName, PhoneNumber, UserId};

/// Row of the residents or officers table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SocietyUser {
    pub id: UserId,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub flat: Option<String>,
}

impl SocietyUser {
    /// Space-joined non-empty name parts.
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Profile {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub flat: Option<String>,
    pub role: Option<String>,
}

/// Partial profile update; `None` fields are left unchanged by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateProfile {
    pub first_name: Option<PersonName>,
    pub middle_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<Email>,
    pub mobile: Option<PhoneNumber>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.middle_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.mobile.is_none()
    }

    /// Changing the login email invalidates the current session.
    pub fn changes_email(&self) -> bool {
        self.email.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PasswordChange {
    pub old_password: Password,
    pub new_password: Password,
}

/// Officer credentials created by an admin.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOfficer {
    pub email: Email,
    pub password: Password,
}

/// Resident self-registration.
#[derive(Clone, Debug, PartialEq)]
pub struct NewResident {
    pub first_name: PersonName,
    pub middle_name: Option<PersonName>,
    pub last_name: PersonName,
    pub email: Email,
    pub mobile: PhoneNumber,
    pub flat: FlatNumber,
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_skips_missing_parts() {
        let user = SocietyUser {
            id: UserId::new("7").unwrap(),
            first_name: Some("Asha".into()),
            middle_name: Some(" ".into()),
            last_name: Some("Rao".into()),
            email: None,
            mobile: None,
            flat: None,
        };
        assert_eq!(user.display_name(), "Asha Rao");
    }

    #[test]
    fn email_change_is_detected() {
        let mut update = UpdateProfile::default();
        assert!(update.is_empty());
        update.email = Some(Email::new("new@example.com").unwrap());
        assert!(!update.is_empty());
        assert!(update.changes_email());
    }
}

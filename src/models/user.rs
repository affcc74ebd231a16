//! Wire shapes of the society member and profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::{NewOfficer, NewResident, PasswordChange, Profile, SocietyUser, UpdateProfile};
use crate::models::envelope::string_or_number;

#[derive(Debug, Clone, Deserialize)]
pub struct SocietyUserRecord {
    #[serde(alias = "ID", alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, alias = "firstName")]
    pub firstname: Option<String>,
    #[serde(default, alias = "middleName")]
    pub middlename: Option<String>,
    #[serde(default, alias = "lastName")]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "mobilenumber")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub flat: Option<String>,
}

impl TryFrom<SocietyUserRecord> for SocietyUser {
    type Error = TypeConstraintError;

    fn try_from(record: SocietyUserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(record.id)?,
            first_name: record.firstname,
            middle_name: record.middlename,
            last_name: record.lastname,
            email: record.email,
            mobile: record.mobile,
            flat: record.flat,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, alias = "firstName")]
    pub firstname: Option<String>,
    #[serde(default, alias = "middleName")]
    pub middlename: Option<String>,
    #[serde(default, alias = "lastName")]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "mobile")]
    pub mobilenumber: Option<String>,
    #[serde(default)]
    pub flat: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            first_name: record.firstname,
            middle_name: record.middlename,
            last_name: record.lastname,
            email: record.email,
            mobile: record.mobilenumber,
            flat: record.flat,
            role: record.role,
        }
    }
}

/// Body of `PATCH /profile/update`; unchanged fields are sent as empty strings.
#[derive(Debug, Serialize, PartialEq)]
pub struct ProfileUpdateBody {
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub email: String,
    pub mobilenumber: String,
}

impl From<&UpdateProfile> for ProfileUpdateBody {
    fn from(update: &UpdateProfile) -> Self {
        Self {
            firstname: update.first_name.as_deref().unwrap_or_default().to_string(),
            middlename: update.middle_name.as_deref().unwrap_or_default().to_string(),
            lastname: update.last_name.as_deref().unwrap_or_default().to_string(),
            email: update
                .email
                .as_ref()
                .map(|e| e.as_str().to_string())
                .unwrap_or_default(),
            mobilenumber: update
                .mobile
                .as_ref()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Body of `PATCH /profile/password`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordBody {
    pub old_password: String,
    pub new_password: String,
}

impl From<&PasswordChange> for PasswordBody {
    fn from(change: &PasswordChange) -> Self {
        Self {
            old_password: change.old_password.as_str().to_string(),
            new_password: change.new_password.as_str().to_string(),
        }
    }
}

/// Body of `POST /officers`.
#[derive(Debug, Serialize, PartialEq)]
pub struct OfficerBody {
    pub email: String,
    pub password: String,
}

impl From<&NewOfficer> for OfficerBody {
    fn from(officer: &NewOfficer) -> Self {
        Self {
            email: officer.email.as_str().to_string(),
            password: officer.password.as_str().to_string(),
        }
    }
}

/// Body of `POST /signup`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub flat: String,
    pub password: String,
}

impl From<&NewResident> for SignupBody {
    fn from(resident: &NewResident) -> Self {
        Self {
            first_name: resident.first_name.as_str().to_string(),
            middle_name: resident
                .middle_name
                .as_ref()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            last_name: resident.last_name.as_str().to_string(),
            email: resident.email.as_str().to_string(),
            mobile: resident.mobile.as_str().to_string(),
            flat: resident.flat.as_str().to_string(),
            password: resident.password.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Email, PersonName};
    use serde_json::json;

    #[test]
    fn profile_update_sends_blank_for_untouched_fields() {
        let update = UpdateProfile {
            first_name: Some(PersonName::new("Meera").unwrap()),
            email: Some(Email::new("meera@example.com").unwrap()),
            ..UpdateProfile::default()
        };
        let body = serde_json::to_value(ProfileUpdateBody::from(&update)).unwrap();
        assert_eq!(
            body,
            json!({
                "firstname": "Meera",
                "middlename": "",
                "lastname": "",
                "email": "meera@example.com",
                "mobilenumber": ""
            })
        );
    }

    #[test]
    fn society_user_accepts_numeric_ids() {
        let record: SocietyUserRecord =
            serde_json::from_value(json!({"id": 9, "firstname": "Kiran", "flat": "B-204"}))
                .unwrap();
        let user = SocietyUser::try_from(record).unwrap();
        assert_eq!(user.id.as_str(), "9");
        assert_eq!(user.flat.as_deref(), Some("B-204"));
    }
}

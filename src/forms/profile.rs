use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, Password, PersonName, PhoneNumber};
use crate::domain::user::{PasswordChange, UpdateProfile};
use crate::forms::{FormError, optional};

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq)]
/// Draft of the update-profile dialog. Blank fields are left unchanged.
pub struct UpdateProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

impl TryFrom<UpdateProfileForm> for UpdateProfile {
    type Error = FormError;

    fn try_from(form: UpdateProfileForm) -> Result<Self, Self::Error> {
        let update = Self {
            first_name: optional(&form.first_name, |v| PersonName::new(v))?,
            middle_name: optional(&form.middle_name, |v| PersonName::new(v))?,
            last_name: optional(&form.last_name, |v| PersonName::new(v))?,
            email: optional(&form.email, |v| Email::new(v))?,
            mobile: optional(&form.mobile, |v| PhoneNumber::new(v))?,
        };
        if update.is_empty() {
            return Err(FormError::NothingToUpdate);
        }
        Ok(update)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_confirmation"))]
/// Draft of the change-password dialog.
pub struct ChangePasswordForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub old_password: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

fn validate_confirmation(form: &ChangePasswordForm) -> Result<(), validator::ValidationError> {
    if form.new_password == form.confirm_password {
        Ok(())
    } else {
        Err(validator::ValidationError::new("password_mismatch"))
    }
}

impl TryFrom<ChangePasswordForm> for PasswordChange {
    type Error = FormError;

    fn try_from(form: ChangePasswordForm) -> Result<Self, Self::Error> {
        if form.new_password != form.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        form.validate()?;
        Ok(Self {
            old_password: Password::new(form.old_password)?,
            new_password: Password::new(form.new_password)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_update_is_rejected() {
        assert!(matches!(
            UpdateProfile::try_from(UpdateProfileForm::default()),
            Err(FormError::NothingToUpdate)
        ));
    }

    #[test]
    fn update_keeps_only_filled_fields() {
        let update = UpdateProfile::try_from(UpdateProfileForm {
            last_name: "Iyer".into(),
            email: "Resident@Example.com".into(),
            ..UpdateProfileForm::default()
        })
        .unwrap();
        assert!(update.first_name.is_none());
        assert_eq!(update.last_name.unwrap().as_str(), "Iyer");
        assert_eq!(update.email.unwrap().as_str(), "resident@example.com");
    }

    #[test]
    fn update_normalizes_mobile_and_middle_name() {
        let update = UpdateProfile::try_from(UpdateProfileForm {
            middle_name: " Kumar ".into(),
            mobile: "98765 43210".into(),
            ..UpdateProfileForm::default()
        })
        .unwrap();
        assert_eq!(update.middle_name.unwrap().as_str(), "Kumar");
        assert_eq!(update.mobile.unwrap().as_str(), "+919876543210");
    }

    #[test]
    fn password_confirmation_must_match() {
        let form = ChangePasswordForm {
            old_password: "old".into(),
            new_password: "new-secret".into(),
            confirm_password: "other".into(),
        };
        assert!(matches!(
            PasswordChange::try_from(form),
            Err(FormError::PasswordMismatch)
        ));

        let form = ChangePasswordForm {
            old_password: String::new(),
            new_password: "new-secret".into(),
            confirm_password: "new-secret".into(),
        };
        assert!(PasswordChange::try_from(form).is_err());
    }
}

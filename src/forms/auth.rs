use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::Credentials;
use crate::domain::types::{Email, FlatNumber, Password, PersonName, PhoneNumber};
use crate::domain::user::NewResident;
use crate::forms::{FormError, optional};

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq)]
pub struct LoginForm {
    #[validate(email)]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: Email::new(form.email)?,
            password: Password::new(form.password)?,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq)]
/// Resident self-registration form.
pub struct SignupForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub last_name: String,
    #[validate(email)]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub mobile: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub flat: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub password: String,
}

impl TryFrom<SignupForm> for NewResident {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            first_name: PersonName::new(form.first_name)?,
            middle_name: optional(&form.middle_name, |v| PersonName::new(v))?,
            last_name: PersonName::new(form.last_name)?,
            email: Email::new(form.email)?,
            mobile: PhoneNumber::new(form.mobile)?,
            flat: FlatNumber::new(form.flat)?,
            password: Password::new(form.password)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_valid_email() {
        let form = LoginForm {
            email: "nope".into(),
            password: "secret".into(),
        };
        assert!(Credentials::try_from(form).is_err());
    }

    #[test]
    fn signup_normalizes_mobile_number() {
        let resident = NewResident::try_from(SignupForm {
            first_name: "Asha".into(),
            middle_name: String::new(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            mobile: "98765 43210".into(),
            flat: "A-101".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(resident.mobile.as_str(), "+919876543210");
        assert!(resident.middle_name.is_none());
    }

    #[test]
    fn signup_keeps_a_filled_middle_name() {
        let resident = NewResident::try_from(SignupForm {
            first_name: "Asha".into(),
            middle_name: "  Devi ".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            mobile: "98765 43210".into(),
            flat: "A-101".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(resident.middle_name.unwrap().as_str(), "Devi");
    }
}

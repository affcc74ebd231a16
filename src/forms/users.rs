use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, Password};
use crate::domain::user::NewOfficer;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq)]
/// Draft of the add-officer dialog.
pub struct AddOfficerForm {
    #[validate(email)]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub password: String,
}

impl TryFrom<AddOfficerForm> for NewOfficer {
    type Error = FormError;

    fn try_from(form: AddOfficerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: Email::new(form.email)?,
            password: Password::new(form.password)?,
        })
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::feedback::NewFeedback;
use crate::domain::types::{FeedbackContent, Rating};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the general feedback dialog.
pub struct GiveFeedbackForm {
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub rating: u8,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub content: String,
}

impl TryFrom<GiveFeedbackForm> for NewFeedback {
    type Error = FormError;

    fn try_from(form: GiveFeedbackForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            rating: Rating::new(form.rating)?,
            content: FeedbackContent::new(form.content)?,
        })
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::notice::NewNotice;
use crate::domain::types::NoticeContent;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the issue-notice dialog.
pub struct IssueNoticeForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub content: String,
}

impl TryFrom<IssueNoticeForm> for NewNotice {
    type Error = FormError;

    fn try_from(form: IssueNoticeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            content: NoticeContent::new(form.content)?,
        })
    }
}

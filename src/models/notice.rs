//! Wire shapes of the `/notices` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::notice::{NewNotice, Notice};
use crate::domain::types::{RecordId, TypeConstraintError};
use crate::models::envelope::{opt_string_or_number, string_or_number};

#[derive(Debug, Clone, Deserialize)]
pub struct NoticeRecord {
    #[serde(default, alias = "ID", deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub content: String,
    #[serde(deserialize_with = "string_or_number")]
    pub month: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl TryFrom<NoticeRecord> for Notice {
    type Error = TypeConstraintError;

    fn try_from(record: NoticeRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.map(RecordId::new).transpose()?,
            content: record.content,
            month: record.month,
            year: record.year,
            date: record.date,
        })
    }
}

/// Body of `POST /notices/issue`.
#[derive(Debug, Serialize, PartialEq)]
pub struct NoticeBody {
    pub content: String,
}

impl From<&NewNotice> for NoticeBody {
    fn from(notice: &NewNotice) -> Self {
        Self {
            content: notice.content.as_str().to_string(),
        }
    }
}

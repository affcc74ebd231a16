//! Notices published on the society board.

use serde::Serialize;

use crate::domain::types::{NoticeContent, RecordId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Notice {
    pub id: Option<RecordId>,
    pub content: String,
    pub month: String,
    pub year: String,
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewNotice {
    pub content: NoticeContent,
}

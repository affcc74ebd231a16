//! Wire shapes of the `/feedbacks` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::feedback::{Feedback, NewFeedback, NewRequestFeedback};
use crate::domain::types::{RecordId, RequestId, TypeConstraintError};
use crate::models::envelope::opt_string_or_number;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flat: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub resident_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub servicetype: Option<String>,
    #[serde(default)]
    pub timeslot: Option<String>,
    #[serde(default)]
    pub assignedto: Option<String>,
}

impl TryFrom<FeedbackRecord> for Feedback {
    type Error = TypeConstraintError;

    fn try_from(record: FeedbackRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.map(RecordId::new).transpose()?,
            rating: record.rating,
            content: record.content,
            date: record.date,
            resident_name: record.name,
            flat: record.flat,
            resident_id: record.resident_id,
            request_id: record.request_id.filter(|id| !id.trim().is_empty()),
            service_type: record.servicetype,
            timeslot: record.timeslot,
            assigned_to: record.assignedto,
        })
    }
}

/// Body of `POST /feedbacks`.
#[derive(Debug, Serialize, PartialEq)]
pub struct FeedbackBody {
    pub rating: u8,
    pub content: String,
}

impl From<&NewFeedback> for FeedbackBody {
    fn from(feedback: &NewFeedback) -> Self {
        Self {
            rating: feedback.rating.get(),
            content: feedback.content.as_str().to_string(),
        }
    }
}

/// Body of `POST /feedbacks/request`.
#[derive(Debug, Serialize, PartialEq)]
pub struct RequestFeedbackBody {
    pub rating: u8,
    pub content: String,
    pub requestid: String,
}

impl From<&NewRequestFeedback> for RequestFeedbackBody {
    fn from(feedback: &NewRequestFeedback) -> Self {
        Self {
            rating: feedback.rating.get(),
            content: feedback.content.as_str().to_string(),
            requestid: feedback.request_id.as_str().to_string(),
        }
    }
}

/// Body of `PATCH /feedbacks/given`.
#[derive(Debug, Serialize, PartialEq)]
pub struct FeedbackGivenBody {
    pub requestid: String,
}

impl From<&RequestId> for FeedbackGivenBody {
    fn from(id: &RequestId) -> Self {
        Self {
            requestid: id.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{FeedbackContent, Rating};
    use serde_json::json;

    #[test]
    fn request_feedback_body_stringifies_the_request_id() {
        let feedback = NewRequestFeedback {
            request_id: RequestId::new("42").unwrap(),
            rating: Rating::new(5).unwrap(),
            content: FeedbackContent::new("Quick fix").unwrap(),
        };
        let body = serde_json::to_value(RequestFeedbackBody::from(&feedback)).unwrap();
        assert_eq!(
            body,
            json!({"rating": 5, "content": "Quick fix", "requestid": "42"})
        );
    }

    #[test]
    fn general_feedback_has_no_request() {
        let record: FeedbackRecord = serde_json::from_value(
            json!({"id": 3, "rating": 4, "content": "Clean lobby", "request_id": ""}),
        )
        .unwrap();
        let feedback = Feedback::try_from(record).unwrap();
        assert_eq!(feedback.id.unwrap().as_str(), "3");
        assert!(feedback.request_id.is_none());
    }
}

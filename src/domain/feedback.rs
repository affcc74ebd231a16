//! Feedback left by residents, either general or about a completed request.

use serde::Serialize;

use crate::domain::types::{FeedbackContent, Rating, RecordId, RequestId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Feedback {
    pub id: Option<RecordId>,
    pub rating: u8,
    pub content: String,
    pub date: Option<String>,
    pub resident_name: Option<String>,
    pub flat: Option<String>,
    pub resident_id: Option<String>,
    /// Set when the feedback is about a service request.
    pub request_id: Option<String>,
    pub service_type: Option<String>,
    pub timeslot: Option<String>,
    pub assigned_to: Option<String>,
}

/// General feedback about the society.
#[derive(Clone, Debug, PartialEq)]
pub struct NewFeedback {
    pub rating: Rating,
    pub content: FeedbackContent,
}

/// Feedback about a completed service request.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRequestFeedback {
    pub request_id: RequestId,
    pub rating: Rating,
    pub content: FeedbackContent,
}

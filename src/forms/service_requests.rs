use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::feedback::NewRequestFeedback;
use crate::domain::service_request::{ApproveRequest, NewServiceRequest, ServiceType};
use crate::domain::types::{Assignee, FeedbackContent, Rating, RequestId, SlotId};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the new-request dialog.
pub struct SubmitRequestForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub service_type: String,
    /// Zero-based position of the chosen slot in the fetched slot list.
    #[serde(default)]
    pub slot_index: Option<usize>,
}

impl TryFrom<SubmitRequestForm> for NewServiceRequest {
    type Error = FormError;

    fn try_from(form: SubmitRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let slot_index = form.slot_index.ok_or(FormError::MissingSlot)?;
        Ok(Self {
            service_type: form.service_type.parse::<ServiceType>()?,
            slot: SlotId::from_index(slot_index)?,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the approve dialog.
pub struct ApproveRequestForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub request_id: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub assigned_to: String,
}

/// Validated approval of one request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApprovePayload {
    pub id: RequestId,
    pub approve: ApproveRequest,
}

impl TryFrom<ApproveRequestForm> for ApprovePayload {
    type Error = FormError;

    fn try_from(form: ApproveRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            id: RequestId::new(form.request_id)?,
            approve: ApproveRequest {
                assigned_to: Assignee::new(form.assigned_to)?,
            },
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the reschedule dialog.
pub struct RescheduleRequestForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub request_id: String,
    /// Service of the request, used to fetch its slots.
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub slot_index: Option<usize>,
}

/// Validated move of a pending request to another slot.
#[derive(Clone, Debug, PartialEq)]
pub struct RescheduleRequest {
    pub id: RequestId,
    pub slot: SlotId,
}

impl TryFrom<RescheduleRequestForm> for RescheduleRequest {
    type Error = FormError;

    fn try_from(form: RescheduleRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let slot_index = form.slot_index.ok_or(FormError::MissingSlot)?;
        Ok(Self {
            id: RequestId::new(form.request_id)?,
            slot: SlotId::from_index(slot_index)?,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the feedback dialog opened on a completed request.
pub struct RequestFeedbackForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub request_id: String,
    #[validate(range(min = 1, max = 5))]
    #[serde(default)]
    pub rating: u8,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub content: String,
}

impl TryFrom<RequestFeedbackForm> for NewRequestFeedback {
    type Error = FormError;

    fn try_from(form: RequestFeedbackForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            request_id: RequestId::new(form.request_id)?,
            rating: Rating::new(form.rating)?,
            content: FeedbackContent::new(form.content)?,
        })
    }
}

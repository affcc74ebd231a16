//! Wire shapes of the `/service` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::service_request::{
    ApproveRequest, NewServiceRequest, RequestBuckets, RequestStatus, ServiceRequest, TimeSlot,
};
use crate::domain::types::{RequestId, SlotId, TypeConstraintError, UserId};
use crate::models::envelope::{opt_string_or_number, string_or_number};

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRequestRecord {
    #[serde(alias = "ID", alias = "requestid", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(alias = "serviceType", alias = "service_type")]
    pub servicetype: String,
    #[serde(default, alias = "assignedTo")]
    pub assignedto: Option<String>,
    #[serde(default)]
    pub timeslot: Option<String>,
    #[serde(default)]
    pub slotid: Option<u32>,
    #[serde(default, alias = "residentid", deserialize_with = "opt_string_or_number")]
    pub resident_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flat: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "feedbackgiven", alias = "feedback")]
    pub feedback_given: Option<bool>,
}

impl ServiceRequestRecord {
    /// Converts the record, using `bucket` when the record carries no status.
    pub fn into_domain(
        self,
        bucket: Option<RequestStatus>,
    ) -> Result<ServiceRequest, TypeConstraintError> {
        let status = match (self.status.as_deref(), bucket) {
            (Some(raw), _) if !raw.trim().is_empty() => raw.parse()?,
            (_, Some(bucket)) => bucket,
            _ => return Err(TypeConstraintError::InvalidValue("missing status".into())),
        };

        Ok(ServiceRequest {
            id: RequestId::new(self.id)?,
            status,
            service_type: self.servicetype.parse()?,
            assigned_to: self.assignedto.filter(|s| !s.trim().is_empty()),
            timeslot: self.timeslot,
            slot_id: self.slotid.map(SlotId::new).transpose()?,
            resident_id: self.resident_id.and_then(|id| UserId::new(id).ok()),
            resident_name: self.name,
            flat: self.flat,
            date: self.date,
            feedback_given: self.feedback_given.unwrap_or(false),
        })
    }
}

impl TryFrom<ServiceRequestRecord> for ServiceRequest {
    type Error = TypeConstraintError;

    fn try_from(record: ServiceRequestRecord) -> Result<Self, Self::Error> {
        record.into_domain(None)
    }
}

/// `{Pending, Approved, Completed}` payload of the listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBucketsRecord {
    #[serde(rename = "Pending", default)]
    pub pending: Option<Vec<ServiceRequestRecord>>,
    #[serde(rename = "Approved", default)]
    pub approved: Option<Vec<ServiceRequestRecord>>,
    #[serde(rename = "Completed", default)]
    pub completed: Option<Vec<ServiceRequestRecord>>,
}

fn convert_bucket(
    records: Option<Vec<ServiceRequestRecord>>,
    status: RequestStatus,
) -> Result<Option<Vec<ServiceRequest>>, TypeConstraintError> {
    records
        .map(|records| {
            records
                .into_iter()
                .map(|record| record.into_domain(Some(status)))
                .collect()
        })
        .transpose()
}

impl TryFrom<RequestBucketsRecord> for RequestBuckets {
    type Error = TypeConstraintError;

    fn try_from(record: RequestBucketsRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            pending: convert_bucket(record.pending, RequestStatus::Pending)?,
            approved: convert_bucket(record.approved, RequestStatus::Approved)?,
            completed: convert_bucket(record.completed, RequestStatus::Completed)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSlotRecord {
    #[serde(rename = "Label", alias = "label")]
    pub label: String,
}

impl From<TimeSlotRecord> for TimeSlot {
    fn from(record: TimeSlotRecord) -> Self {
        Self {
            label: record.label,
        }
    }
}

/// Body of `POST /service`.
#[derive(Debug, Serialize, PartialEq)]
pub struct NewServiceRequestBody {
    pub servicetype: String,
    pub slotid: u32,
}

impl From<&NewServiceRequest> for NewServiceRequestBody {
    fn from(request: &NewServiceRequest) -> Self {
        Self {
            servicetype: request.service_type.wire_name(),
            slotid: request.slot.get(),
        }
    }
}

/// Body of `PATCH /service/approve/{id}`.
#[derive(Debug, Serialize, PartialEq)]
pub struct ApproveBody {
    pub assignedto: String,
}

impl From<&ApproveRequest> for ApproveBody {
    fn from(approve: &ApproveRequest) -> Self {
        Self {
            assignedto: approve.assigned_to.as_str().to_string(),
        }
    }
}

/// Body of `PATCH /service/reschedule/{id}`.
#[derive(Debug, Serialize, PartialEq)]
pub struct RescheduleBody {
    pub slotid: u32,
}

impl From<SlotId> for RescheduleBody {
    fn from(slot: SlotId) -> Self {
        Self { slotid: slot.get() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_request::ServiceType;
    use serde_json::json;

    #[test]
    fn new_request_body_matches_backend_contract() {
        let request = NewServiceRequest {
            service_type: ServiceType::Plumber,
            slot: SlotId::from_index(2).unwrap(),
        };
        let body = serde_json::to_value(NewServiceRequestBody::from(&request)).unwrap();
        assert_eq!(body, json!({"servicetype": "plumber", "slotid": 3}));
    }

    #[test]
    fn buckets_take_status_from_their_key() {
        let raw = json!({
            "Pending": [{"id": 11, "servicetype": "plumber", "timeslot": "10:00 - 11:00"}],
            "Approved": null,
            "Completed": [{"id": "12", "servicetype": "electrician", "assignedto": "Ravi"}]
        });
        let record: RequestBucketsRecord = serde_json::from_value(raw).unwrap();
        let buckets = RequestBuckets::try_from(record).unwrap();

        assert_eq!(buckets.bucket(RequestStatus::Pending)[0].id.as_str(), "11");
        assert_eq!(
            buckets.bucket(RequestStatus::Pending)[0].service_type,
            ServiceType::Plumber
        );
        assert!(buckets.approved.is_none());
        assert_eq!(
            buckets.bucket(RequestStatus::Completed)[0].status,
            RequestStatus::Completed
        );
    }

    #[test]
    fn search_results_need_their_own_status() {
        let record: ServiceRequestRecord =
            serde_json::from_value(json!({"id": "R1", "servicetype": "plumber"})).unwrap();
        assert!(ServiceRequest::try_from(record).is_err());
    }

    #[test]
    fn time_slot_label_is_capitalized_on_the_wire() {
        let slot: TimeSlotRecord = serde_json::from_value(json!({"Label": "09:00"})).unwrap();
        assert_eq!(TimeSlot::from(slot).label, "09:00");
    }
}

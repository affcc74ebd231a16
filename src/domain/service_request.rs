//! Service requests raised by residents and handled by society staff.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::types::{Assignee, RequestId, SlotId, TypeConstraintError, UserId};

/// Kind of service a resident can book.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Electrician,
    Plumber,
    Other(String),
}

impl ServiceType {
    /// Service types offered in the request dialog.
    pub const OFFERED: [ServiceType; 2] = [ServiceType::Electrician, ServiceType::Plumber];

    /// Human-readable label shown in listings and facet options.
    pub fn label(&self) -> &str {
        match self {
            ServiceType::Electrician => "Electrician",
            ServiceType::Plumber => "Plumber",
            ServiceType::Other(name) => name,
        }
    }

    /// Lower-case spelling the backend expects in queries and payloads.
    pub fn wire_name(&self) -> String {
        self.label().to_lowercase()
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err(TypeConstraintError::EmptyString),
            "electrician" => Ok(ServiceType::Electrician),
            "plumber" => Ok(ServiceType::Plumber),
            _ => Ok(ServiceType::Other(trimmed.to_string())),
        }
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Lifecycle status of a service request. Ordered from first to last.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestStatus {
    Pending,
    Approved,
    Completed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Completed => "Completed",
        }
    }

    /// Lower-case spelling used by the search endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Completed => "completed",
        }
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequestStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown request status `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub status: RequestStatus,
    pub service_type: ServiceType,
    pub assigned_to: Option<String>,
    /// Label of the booked time slot.
    pub timeslot: Option<String>,
    pub slot_id: Option<SlotId>,
    pub resident_id: Option<UserId>,
    pub resident_name: Option<String>,
    pub flat: Option<String>,
    pub date: Option<String>,
    pub feedback_given: bool,
}

/// Requests grouped by status as returned by the listing endpoints.
///
/// A `None` bucket means the backend sent `null` for that status.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct RequestBuckets {
    pub pending: Option<Vec<ServiceRequest>>,
    pub approved: Option<Vec<ServiceRequest>>,
    pub completed: Option<Vec<ServiceRequest>>,
}

impl RequestBuckets {
    pub fn bucket(&self, status: RequestStatus) -> &[ServiceRequest] {
        let bucket = match status {
            RequestStatus::Pending => &self.pending,
            RequestStatus::Approved => &self.approved,
            RequestStatus::Completed => &self.completed,
        };
        bucket.as_deref().unwrap_or_default()
    }

    /// Pending, then approved, then completed requests in server order.
    pub fn all(&self) -> Vec<ServiceRequest> {
        RequestStatus::ALL
            .iter()
            .flat_map(|status| self.bucket(*status).iter().cloned())
            .collect()
    }

    pub fn find(&self, id: &RequestId) -> Option<&ServiceRequest> {
        RequestStatus::ALL
            .iter()
            .flat_map(|status| self.bucket(*status).iter())
            .find(|request| &request.id == id)
    }
}

/// Bookable slot returned by `/service/time-slots`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub label: String,
}

/// Payload for creating a request.
#[derive(Clone, Debug, PartialEq)]
pub struct NewServiceRequest {
    pub service_type: ServiceType,
    pub slot: SlotId,
}

/// Payload for approving a pending request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApproveRequest {
    pub assigned_to: Assignee,
}

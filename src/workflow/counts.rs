use serde::Serialize;

use crate::domain::service_request::{RequestBuckets, RequestStatus};

/// Per-status request counts shown above the listing.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct RequestCounts {
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,
    pub total: usize,
}

impl From<&RequestBuckets> for RequestCounts {
    fn from(buckets: &RequestBuckets) -> Self {
        let pending = buckets.bucket(RequestStatus::Pending).len();
        let approved = buckets.bucket(RequestStatus::Approved).len();
        let completed = buckets.bucket(RequestStatus::Completed).len();
        Self {
            pending,
            approved,
            completed,
            total: pending + approved + completed,
        }
    }
}

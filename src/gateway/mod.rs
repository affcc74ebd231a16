//! Boundary to the society backend.
//!
//! Each resource gets a reader and a writer trait so views and services can
//! ask for exactly the capabilities they use. [`http::HttpGateway`] implements
//! all of them over `reqwest`; tests use the `mockall` double in [`mock`].

use async_trait::async_trait;

use crate::domain::auth::{Credentials, LoginSession};
use crate::domain::feedback::{Feedback, NewFeedback, NewRequestFeedback};
use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::service_request::{
    ApproveRequest, NewServiceRequest, RequestBuckets, RequestStatus, ServiceRequest, ServiceType,
    TimeSlot,
};
use crate::domain::types::{RequestId, SlotId, UserId};
use crate::domain::user::{
    NewOfficer, NewResident, PasswordChange, Profile, SocietyUser, UpdateProfile,
};
use crate::facets::PeriodQuery;
use crate::gateway::errors::GatewayResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginSession>;
    async fn signup(&self, resident: &NewResident) -> GatewayResult<()>;
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn get_profile(&self) -> GatewayResult<Profile>;
}

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn update_profile(&self, update: &UpdateProfile) -> GatewayResult<()>;
    async fn change_password(&self, change: &PasswordChange) -> GatewayResult<()>;
    async fn delete_profile(&self) -> GatewayResult<()>;
}

#[async_trait]
pub trait FeedbackReader: Send + Sync {
    async fn list_feedbacks(&self) -> GatewayResult<Vec<Feedback>>;
}

#[async_trait]
pub trait FeedbackWriter: Send + Sync {
    async fn submit_feedback(&self, feedback: &NewFeedback) -> GatewayResult<()>;
    async fn submit_request_feedback(&self, feedback: &NewRequestFeedback) -> GatewayResult<()>;
    async fn mark_feedback_given(&self, request_id: &RequestId) -> GatewayResult<()>;
}

#[async_trait]
pub trait NoticeReader: Send + Sync {
    async fn list_notices(&self) -> GatewayResult<Vec<Notice>>;
    async fn search_notices(&self, query: &PeriodQuery) -> GatewayResult<Vec<Notice>>;
}

#[async_trait]
pub trait NoticeWriter: Send + Sync {
    async fn issue_notice(&self, notice: &NewNotice) -> GatewayResult<()>;
}

#[async_trait]
pub trait InvoiceReader: Send + Sync {
    /// Every invoice visible to the caller (`year=0`).
    async fn list_invoices(&self) -> GatewayResult<Vec<Invoice>>;
    async fn search_invoices(&self, query: &PeriodQuery) -> GatewayResult<Vec<Invoice>>;
}

#[async_trait]
pub trait InvoiceWriter: Send + Sync {
    async fn issue_invoice(&self, invoice: &NewInvoice) -> GatewayResult<()>;
}

#[async_trait]
pub trait ServiceRequestReader: Send + Sync {
    /// Every request in the society, used by admins and officers.
    async fn list_all_requests(&self) -> GatewayResult<RequestBuckets>;
    /// Requests raised by the signed-in resident.
    async fn list_resident_requests(&self) -> GatewayResult<RequestBuckets>;
    async fn search_requests(
        &self,
        service: &ServiceType,
        status: RequestStatus,
    ) -> GatewayResult<Vec<ServiceRequest>>;
    async fn list_time_slots(&self, service: &ServiceType) -> GatewayResult<Vec<TimeSlot>>;
}

#[async_trait]
pub trait ServiceRequestWriter: Send + Sync {
    async fn create_request(&self, request: &NewServiceRequest) -> GatewayResult<()>;
    async fn approve_request(&self, id: &RequestId, approve: &ApproveRequest)
    -> GatewayResult<()>;
    async fn reschedule_request(&self, id: &RequestId, slot: SlotId) -> GatewayResult<()>;
    async fn complete_request(&self, id: &RequestId) -> GatewayResult<()>;
    async fn cancel_request(&self, id: &RequestId) -> GatewayResult<()>;
}

#[async_trait]
pub trait SocietyReader: Send + Sync {
    async fn list_residents(&self) -> GatewayResult<Vec<SocietyUser>>;
    async fn list_officers(&self) -> GatewayResult<Vec<SocietyUser>>;
}

#[async_trait]
pub trait SocietyWriter: Send + Sync {
    async fn add_officer(&self, officer: &NewOfficer) -> GatewayResult<()>;
    async fn delete_officer(&self, id: &UserId) -> GatewayResult<()>;
    async fn delete_resident(&self, id: &UserId) -> GatewayResult<()>;
}

//! Mock gateway for isolating views and services in tests.

use async_trait::async_trait;
use mockall::mock;

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
use crate::gateway::{
    AuthGateway, FeedbackReader, FeedbackWriter, InvoiceReader, InvoiceWriter, NoticeReader,
    NoticeWriter, ProfileReader, ProfileWriter, ServiceRequestReader, ServiceRequestWriter,
    SocietyReader, SocietyWriter,
};

mock! {
    pub Gateway {}

    #[async_trait]
    impl AuthGateway for Gateway {
        async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginSession>;
        async fn signup(&self, resident: &NewResident) -> GatewayResult<()>;
    }

    #[async_trait]
    impl ProfileReader for Gateway {
        async fn get_profile(&self) -> GatewayResult<Profile>;
    }

    #[async_trait]
    impl ProfileWriter for Gateway {
        async fn update_profile(&self, update: &UpdateProfile) -> GatewayResult<()>;
        async fn change_password(&self, change: &PasswordChange) -> GatewayResult<()>;
        async fn delete_profile(&self) -> GatewayResult<()>;
    }

    #[async_trait]
    impl FeedbackReader for Gateway {
        async fn list_feedbacks(&self) -> GatewayResult<Vec<Feedback>>;
    }

    #[async_trait]
    impl FeedbackWriter for Gateway {
        async fn submit_feedback(&self, feedback: &NewFeedback) -> GatewayResult<()>;
        async fn submit_request_feedback(
            &self,
            feedback: &NewRequestFeedback,
        ) -> GatewayResult<()>;
        async fn mark_feedback_given(&self, request_id: &RequestId) -> GatewayResult<()>;
    }

    #[async_trait]
    impl NoticeReader for Gateway {
        async fn list_notices(&self) -> GatewayResult<Vec<Notice>>;
        async fn search_notices(&self, query: &PeriodQuery) -> GatewayResult<Vec<Notice>>;
    }

    #[async_trait]
    impl NoticeWriter for Gateway {
        async fn issue_notice(&self, notice: &NewNotice) -> GatewayResult<()>;
    }

    #[async_trait]
    impl InvoiceReader for Gateway {
        async fn list_invoices(&self) -> GatewayResult<Vec<Invoice>>;
        async fn search_invoices(&self, query: &PeriodQuery) -> GatewayResult<Vec<Invoice>>;
    }

    #[async_trait]
    impl InvoiceWriter for Gateway {
        async fn issue_invoice(&self, invoice: &NewInvoice) -> GatewayResult<()>;
    }

    #[async_trait]
    impl ServiceRequestReader for Gateway {
        async fn list_all_requests(&self) -> GatewayResult<RequestBuckets>;
        async fn list_resident_requests(&self) -> GatewayResult<RequestBuckets>;
        async fn search_requests(
            &self,
            service: &ServiceType,
            status: RequestStatus,
        ) -> GatewayResult<Vec<ServiceRequest>>;
        async fn list_time_slots(&self, service: &ServiceType) -> GatewayResult<Vec<TimeSlot>>;
    }

    #[async_trait]
    impl ServiceRequestWriter for Gateway {
        async fn create_request(&self, request: &NewServiceRequest) -> GatewayResult<()>;
        async fn approve_request(
            &self,
            id: &RequestId,
            approve: &ApproveRequest,
        ) -> GatewayResult<()>;
        async fn reschedule_request(&self, id: &RequestId, slot: SlotId) -> GatewayResult<()>;
        async fn complete_request(&self, id: &RequestId) -> GatewayResult<()>;
        async fn cancel_request(&self, id: &RequestId) -> GatewayResult<()>;
    }

    #[async_trait]
    impl SocietyReader for Gateway {
        async fn list_residents(&self) -> GatewayResult<Vec<SocietyUser>>;
        async fn list_officers(&self) -> GatewayResult<Vec<SocietyUser>>;
    }

    #[async_trait]
    impl SocietyWriter for Gateway {
        async fn add_officer(&self, officer: &NewOfficer) -> GatewayResult<()>;
        async fn delete_officer(&self, id: &UserId) -> GatewayResult<()>;
        async fn delete_resident(&self, id: &UserId) -> GatewayResult<()>;
    }
}

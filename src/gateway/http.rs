//! `reqwest` implementation of the gateway traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::domain::auth::{Credentials, LoginSession};
use crate::domain::feedback::{Feedback, NewFeedback, NewRequestFeedback};
use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::service_request::{
    ApproveRequest, NewServiceRequest, RequestBuckets, RequestStatus, ServiceRequest, ServiceType,
    TimeSlot,
};
use crate::domain::types::{RequestId, SlotId, TypeConstraintError, UserId};
use crate::domain::user::{
    NewOfficer, NewResident, PasswordChange, Profile, SocietyUser, UpdateProfile,
};
use crate::facets::PeriodQuery;
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::{
    AuthGateway, FeedbackReader, FeedbackWriter, InvoiceReader, InvoiceWriter, NoticeReader,
    NoticeWriter, ProfileReader, ProfileWriter, ServiceRequestReader, ServiceRequestWriter,
    SocietyReader, SocietyWriter,
};
use crate::models::auth::{LoginBody, LoginRecord};
use crate::models::envelope::{decode, decode_listing};
use crate::models::feedback::{
    FeedbackBody, FeedbackGivenBody, FeedbackRecord, RequestFeedbackBody,
};
use crate::models::invoice::{InvoiceBody, InvoiceRecord};
use crate::models::notice::{NoticeBody, NoticeRecord};
use crate::models::service_request::{
    ApproveBody, NewServiceRequestBody, RequestBucketsRecord, RescheduleBody,
    ServiceRequestRecord, TimeSlotRecord,
};
use crate::models::user::{
    OfficerBody, PasswordBody, ProfileRecord, ProfileUpdateBody, SignupBody, SocietyUserRecord,
};

type Query = Vec<(&'static str, String)>;

/// Gateway talking to the backend over HTTP.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its pool.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> GatewayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Copy of this gateway that authenticates as the given session token.
    #[must_use]
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> GatewayResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::debug!("Backend responded with {status}: {body}");
            return Err(failure(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn fetch_listing<R, T>(&self, path: &str, query: &Query) -> GatewayResult<Vec<T>>
    where
        R: DeserializeOwned,
        T: TryFrom<R, Error = TypeConstraintError>,
    {
        let body = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        let records: Vec<R> = decode_listing(&body)?;
        Ok(records
            .into_iter()
            .map(T::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn fetch_one<R: DeserializeOwned>(&self, path: &str, query: &Query) -> GatewayResult<R> {
        let body = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        decode::<R>(&body)?.ok_or(GatewayError::MissingData)
    }

    /// Issues a mutating call whose payload, if any, is ignored.
    async fn execute<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&B>,
    ) -> GatewayResult<()> {
        let mut builder = self.request(method, path).query(query);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let body = self.send(builder).await?;
        decode::<IgnoredAny>(&body)?;
        Ok(())
    }

    async fn fetch_buckets(&self, path: &str) -> GatewayResult<RequestBuckets> {
        let body = self.send(self.request(Method::GET, path)).await?;
        match decode::<RequestBucketsRecord>(&body)? {
            Some(record) => Ok(RequestBuckets::try_from(record)?),
            None => Ok(RequestBuckets::default()),
        }
    }
}

fn period_params(query: &PeriodQuery) -> Query {
    match query {
        PeriodQuery::All => vec![("year", "0".to_string())],
        PeriodQuery::Year(year) => vec![("year", year.clone())],
        PeriodQuery::YearMonth { year, month } => {
            vec![("month", month.clone()), ("year", year.clone())]
        }
    }
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginSession> {
        let body = self
            .send(
                self.request(Method::POST, "/login")
                    .json(&LoginBody::from(credentials)),
            )
            .await?;
        let record = decode::<LoginRecord>(&body)?.ok_or(GatewayError::MissingData)?;
        Ok(LoginSession::try_from(record)?)
    }

    async fn signup(&self, resident: &NewResident) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/signup",
            &Query::new(),
            Some(&SignupBody::from(resident)),
        )
        .await
    }
}

#[async_trait]
impl ProfileReader for HttpGateway {
    async fn get_profile(&self) -> GatewayResult<Profile> {
        let record: ProfileRecord = self.fetch_one("/profile", &Query::new()).await?;
        Ok(record.into())
    }
}

#[async_trait]
impl ProfileWriter for HttpGateway {
    async fn update_profile(&self, update: &UpdateProfile) -> GatewayResult<()> {
        self.execute(
            Method::PATCH,
            "/profile/update",
            &Query::new(),
            Some(&ProfileUpdateBody::from(update)),
        )
        .await
    }

    async fn change_password(&self, change: &PasswordChange) -> GatewayResult<()> {
        self.execute(
            Method::PATCH,
            "/profile/password",
            &Query::new(),
            Some(&PasswordBody::from(change)),
        )
        .await
    }

    async fn delete_profile(&self) -> GatewayResult<()> {
        self.execute(Method::DELETE, "/profile", &Query::new(), NO_BODY)
            .await
    }
}

#[async_trait]
impl FeedbackReader for HttpGateway {
    async fn list_feedbacks(&self) -> GatewayResult<Vec<Feedback>> {
        self.fetch_listing::<FeedbackRecord, _>("/feedbacks", &Query::new())
            .await
    }
}

#[async_trait]
impl FeedbackWriter for HttpGateway {
    async fn submit_feedback(&self, feedback: &NewFeedback) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/feedbacks",
            &Query::new(),
            Some(&FeedbackBody::from(feedback)),
        )
        .await
    }

    async fn submit_request_feedback(&self, feedback: &NewRequestFeedback) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/feedbacks/request",
            &Query::new(),
            Some(&RequestFeedbackBody::from(feedback)),
        )
        .await
    }

    async fn mark_feedback_given(&self, request_id: &RequestId) -> GatewayResult<()> {
        self.execute(
            Method::PATCH,
            "/feedbacks/given",
            &Query::new(),
            Some(&FeedbackGivenBody::from(request_id)),
        )
        .await
    }
}

#[async_trait]
impl NoticeReader for HttpGateway {
    async fn list_notices(&self) -> GatewayResult<Vec<Notice>> {
        self.fetch_listing::<NoticeRecord, _>("/notices", &Query::new())
            .await
    }

    async fn search_notices(&self, query: &PeriodQuery) -> GatewayResult<Vec<Notice>> {
        match query {
            PeriodQuery::All => self.list_notices().await,
            _ => {
                self.fetch_listing::<NoticeRecord, _>("/notices/month-year", &period_params(query))
                    .await
            }
        }
    }
}

#[async_trait]
impl NoticeWriter for HttpGateway {
    async fn issue_notice(&self, notice: &NewNotice) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/notices/issue",
            &Query::new(),
            Some(&NoticeBody::from(notice)),
        )
        .await
    }
}

#[async_trait]
impl InvoiceReader for HttpGateway {
    async fn list_invoices(&self) -> GatewayResult<Vec<Invoice>> {
        self.search_invoices(&PeriodQuery::All).await
    }

    async fn search_invoices(&self, query: &PeriodQuery) -> GatewayResult<Vec<Invoice>> {
        self.fetch_listing::<InvoiceRecord, _>("/invoices/month-year", &period_params(query))
            .await
    }
}

#[async_trait]
impl InvoiceWriter for HttpGateway {
    async fn issue_invoice(&self, invoice: &NewInvoice) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/invoices/issue",
            &Query::new(),
            Some(&InvoiceBody::from(invoice)),
        )
        .await
    }
}

#[async_trait]
impl ServiceRequestReader for HttpGateway {
    async fn list_all_requests(&self) -> GatewayResult<RequestBuckets> {
        self.fetch_buckets("/service/all").await
    }

    async fn list_resident_requests(&self) -> GatewayResult<RequestBuckets> {
        self.fetch_buckets("/service/resident/all").await
    }

    async fn search_requests(
        &self,
        service: &ServiceType,
        status: RequestStatus,
    ) -> GatewayResult<Vec<ServiceRequest>> {
        let query = vec![
            ("status", status.wire_name().to_string()),
            ("serviceType", service.wire_name()),
        ];
        let body = self
            .send(
                self.request(Method::GET, "/service/type-status")
                    .query(&query),
            )
            .await?;
        let records: Vec<ServiceRequestRecord> = decode_listing(&body)?;
        Ok(records
            .into_iter()
            .map(|record| record.into_domain(Some(status)))
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn list_time_slots(&self, service: &ServiceType) -> GatewayResult<Vec<TimeSlot>> {
        let query = vec![("serviceType", service.wire_name())];
        let body = self
            .send(self.request(Method::GET, "/service/time-slots").query(&query))
            .await?;
        let records: Vec<TimeSlotRecord> = decode_listing(&body)?;
        Ok(records.into_iter().map(TimeSlot::from).collect())
    }
}

#[async_trait]
impl ServiceRequestWriter for HttpGateway {
    async fn create_request(&self, request: &NewServiceRequest) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/service",
            &Query::new(),
            Some(&NewServiceRequestBody::from(request)),
        )
        .await
    }

    async fn approve_request(
        &self,
        id: &RequestId,
        approve: &ApproveRequest,
    ) -> GatewayResult<()> {
        self.execute(
            Method::PATCH,
            &format!("/service/approve/{id}"),
            &Query::new(),
            Some(&ApproveBody::from(approve)),
        )
        .await
    }

    async fn reschedule_request(&self, id: &RequestId, slot: SlotId) -> GatewayResult<()> {
        self.execute(
            Method::PATCH,
            &format!("/service/reschedule/{id}"),
            &Query::new(),
            Some(&RescheduleBody::from(slot)),
        )
        .await
    }

    async fn complete_request(&self, id: &RequestId) -> GatewayResult<()> {
        self.execute(
            Method::PATCH,
            &format!("/service/complete/{id}"),
            &Query::new(),
            Some(&serde_json::json!({})),
        )
        .await
    }

    async fn cancel_request(&self, id: &RequestId) -> GatewayResult<()> {
        self.execute(
            Method::DELETE,
            &format!("/service/cancel/{id}"),
            &Query::new(),
            NO_BODY,
        )
        .await
    }
}

#[async_trait]
impl SocietyReader for HttpGateway {
    async fn list_residents(&self) -> GatewayResult<Vec<SocietyUser>> {
        self.fetch_listing::<SocietyUserRecord, _>("/society/residents", &Query::new())
            .await
    }

    async fn list_officers(&self) -> GatewayResult<Vec<SocietyUser>> {
        self.fetch_listing::<SocietyUserRecord, _>("/society/officers", &Query::new())
            .await
    }
}

#[async_trait]
impl SocietyWriter for HttpGateway {
    async fn add_officer(&self, officer: &NewOfficer) -> GatewayResult<()> {
        self.execute(
            Method::POST,
            "/officers",
            &Query::new(),
            Some(&OfficerBody::from(officer)),
        )
        .await
    }

    async fn delete_officer(&self, id: &UserId) -> GatewayResult<()> {
        let query = vec![("id", id.to_string())];
        self.execute(Method::DELETE, "/credentials/officer", &query, NO_BODY)
            .await
    }

    async fn delete_resident(&self, id: &UserId) -> GatewayResult<()> {
        let query = vec![("id", id.to_string())];
        self.execute(Method::DELETE, "/credentials/resident", &query, NO_BODY)
            .await
    }
}

/// Error for a non-2xx response.
///
/// `401` always stays a status error so an expired session is recognised;
/// other responses carrying a `fail` envelope keep the backend's message.
fn failure(status: u16, body: &str) -> GatewayError {
    if status == 401 {
        return GatewayError::Status(status);
    }
    match decode::<IgnoredAny>(body) {
        Err(rejected @ GatewayError::Rejected { .. }) => rejected,
        _ => GatewayError::Status(status),
    }
}

//! Pre-fetches the data a page is activated with.
//!
//! A failed fetch degrades to `None` so the page still renders.

use std::fmt::Display;
use std::future::Future;

use crate::domain::feedback::Feedback;
use crate::domain::invoice::Invoice;
use crate::domain::notice::Notice;
use crate::domain::role::RoleContext;
use crate::domain::service_request::RequestBuckets;
use crate::domain::user::SocietyUser;
use crate::gateway::{
    FeedbackReader, InvoiceReader, NoticeReader, ServiceRequestReader, SocietyReader,
};
use crate::services;

/// Awaits `fetch`, logging and swallowing its error.
pub async fn resolve<T, E, F>(label: &str, fetch: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match fetch.await {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("Failed to resolve {label}: {err}");
            None
        }
    }
}

pub async fn resolve_requests<G>(gateway: &G, role: &RoleContext) -> Option<RequestBuckets>
where
    G: ServiceRequestReader + ?Sized,
{
    resolve(
        "service requests",
        services::service_requests::load_requests(gateway, role),
    )
    .await
}

pub async fn resolve_invoices<G>(gateway: &G, role: &RoleContext) -> Option<Vec<Invoice>>
where
    G: InvoiceReader + ?Sized,
{
    resolve("invoices", services::invoices::list_invoices(gateway, role)).await
}

pub async fn resolve_notices<G>(gateway: &G, role: &RoleContext) -> Option<Vec<Notice>>
where
    G: NoticeReader + ?Sized,
{
    resolve("notices", services::notices::list_notices(gateway, role)).await
}

pub async fn resolve_feedbacks<G>(gateway: &G, role: &RoleContext) -> Option<Vec<Feedback>>
where
    G: FeedbackReader + ?Sized,
{
    resolve("feedbacks", services::feedback::list_feedbacks(gateway, role)).await
}

/// Residents and officers, resolved independently.
#[derive(Clone, Debug, Default)]
pub struct SocietyData {
    pub residents: Option<Vec<SocietyUser>>,
    pub officers: Option<Vec<SocietyUser>>,
}

pub async fn resolve_society<G>(gateway: &G, role: &RoleContext) -> SocietyData
where
    G: SocietyReader + ?Sized,
{
    SocietyData {
        residents: resolve(
            "residents",
            services::users::list_residents(gateway, role),
        )
        .await,
        officers: resolve("officers", services::users::list_officers(gateway, role)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;

    #[tokio::test]
    async fn upstream_failure_resolves_to_none() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list_notices()
            .returning(|| Err(GatewayError::Status(502)));

        let notices = resolve_notices(&gateway, &RoleContext::from(Role::Resident)).await;
        assert!(notices.is_none());
    }

    #[tokio::test]
    async fn society_halves_resolve_independently() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list_residents()
            .returning(|| Err(GatewayError::Transport("timeout".into())));
        gateway.expect_list_officers().returning(|| Ok(vec![]));

        let data = resolve_society(&gateway, &RoleContext::from(Role::Admin)).await;
        assert!(data.residents.is_none());
        assert_eq!(data.officers, Some(vec![]));
    }
}

//! Service request operations for residents and staff.

use crate::domain::feedback::NewRequestFeedback;
use crate::domain::role::RoleContext;
use crate::domain::service_request::{
    ApproveRequest, NewServiceRequest, RequestBuckets, ServiceRequest, ServiceType, TimeSlot,
};
use crate::domain::types::SlotId;
use crate::facets::RequestQuery;
use crate::gateway::{FeedbackWriter, ServiceRequestReader, ServiceRequestWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::workflow::{RefreshScope, Transition};

/// Listing scope of the caller: staff see every request, residents their own.
pub fn scope_for(role: &RoleContext) -> ServiceResult<RefreshScope> {
    let capabilities = CapabilitySet::resolve(role);
    if capabilities.allows(Capability::ViewAllRequests) {
        Ok(RefreshScope::All)
    } else if capabilities.allows(Capability::SubmitRequest) {
        Ok(RefreshScope::Resident)
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub async fn fetch_buckets<G>(gateway: &G, scope: RefreshScope) -> ServiceResult<RequestBuckets>
where
    G: ServiceRequestReader + ?Sized,
{
    let buckets = match scope {
        RefreshScope::All => gateway.list_all_requests().await?,
        RefreshScope::Resident => gateway.list_resident_requests().await?,
    };
    Ok(buckets)
}

/// Loads the caller's request buckets.
pub async fn load_requests<G>(gateway: &G, role: &RoleContext) -> ServiceResult<RequestBuckets>
where
    G: ServiceRequestReader + ?Sized,
{
    let scope = scope_for(role)?;
    fetch_buckets(gateway, scope).await
}

/// Runs a search; an unfiltered query returns the caller's whole listing.
pub async fn search_requests<G>(
    gateway: &G,
    role: &RoleContext,
    query: &RequestQuery,
) -> ServiceResult<Vec<ServiceRequest>>
where
    G: ServiceRequestReader + ?Sized,
{
    match query {
        RequestQuery::Unfiltered => Ok(load_requests(gateway, role).await?.all()),
        RequestQuery::TypeStatus { service, status } => {
            scope_for(role)?;
            Ok(gateway.search_requests(service, *status).await?)
        }
    }
}

pub async fn list_time_slots<G>(
    gateway: &G,
    role: &RoleContext,
    service: &ServiceType,
) -> ServiceResult<Vec<TimeSlot>>
where
    G: ServiceRequestReader + ?Sized,
{
    let capabilities = CapabilitySet::resolve(role);
    if !capabilities.allows(Capability::SubmitRequest)
        && !capabilities.allows(Capability::RescheduleRequest)
    {
        return Err(ServiceError::Unauthorized);
    }
    Ok(gateway.list_time_slots(service).await?)
}

pub async fn submit_request<G>(
    gateway: &G,
    role: &RoleContext,
    request: &NewServiceRequest,
) -> ServiceResult<()>
where
    G: ServiceRequestWriter + ?Sized,
{
    Transition::Submit.check(role, None)?;
    gateway.create_request(request).await?;
    Ok(())
}

pub async fn approve_request<G>(
    gateway: &G,
    role: &RoleContext,
    record: &ServiceRequest,
    approve: &ApproveRequest,
) -> ServiceResult<()>
where
    G: ServiceRequestWriter + ?Sized,
{
    Transition::Approve.check(role, Some(record))?;
    gateway.approve_request(&record.id, approve).await?;
    Ok(())
}

pub async fn complete_request<G>(
    gateway: &G,
    role: &RoleContext,
    record: &ServiceRequest,
) -> ServiceResult<()>
where
    G: ServiceRequestWriter + ?Sized,
{
    Transition::Complete.check(role, Some(record))?;
    gateway.complete_request(&record.id).await?;
    Ok(())
}

pub async fn reschedule_request<G>(
    gateway: &G,
    role: &RoleContext,
    record: &ServiceRequest,
    slot: SlotId,
) -> ServiceResult<()>
where
    G: ServiceRequestWriter + ?Sized,
{
    Transition::Reschedule.check(role, Some(record))?;
    gateway.reschedule_request(&record.id, slot).await?;
    Ok(())
}

pub async fn cancel_request<G>(
    gateway: &G,
    role: &RoleContext,
    record: &ServiceRequest,
) -> ServiceResult<()>
where
    G: ServiceRequestWriter + ?Sized,
{
    Transition::Cancel.check(role, Some(record))?;
    gateway.cancel_request(&record.id).await?;
    Ok(())
}

/// Posts feedback about a completed request, then flags the request as reviewed.
///
/// A failed flag is only logged once the feedback itself is stored.
pub async fn give_request_feedback<G>(
    gateway: &G,
    role: &RoleContext,
    record: &ServiceRequest,
    feedback: &NewRequestFeedback,
) -> ServiceResult<()>
where
    G: FeedbackWriter + ?Sized,
{
    Transition::AttachFeedback.check(role, Some(record))?;
    if feedback.request_id != record.id {
        return Err(ServiceError::NotFound);
    }
    gateway.submit_request_feedback(feedback).await?;
    // Feedback is stored from here on; the flag is best effort.
    if let Err(err) = gateway.mark_feedback_given(&record.id).await {
        log::warn!("Feedback for request {} posted but not flagged: {err}", record.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::domain::service_request::RequestStatus;
    use crate::domain::types::{Assignee, RequestId};
    use crate::gateway::mock::MockGateway;

    fn pending() -> ServiceRequest {
        ServiceRequest {
            id: RequestId::new("R1").unwrap(),
            status: RequestStatus::Pending,
            service_type: ServiceType::Plumber,
            assigned_to: None,
            timeslot: None,
            slot_id: None,
            resident_id: None,
            resident_name: None,
            flat: None,
            date: None,
            feedback_given: false,
        }
    }

    #[tokio::test]
    async fn residents_load_their_own_buckets() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list_resident_requests()
            .times(1)
            .returning(|| Ok(RequestBuckets::default()));
        gateway.expect_list_all_requests().never();

        let buckets = load_requests(&gateway, &RoleContext::from(Role::Resident))
            .await
            .unwrap();
        assert!(buckets.all().is_empty());
    }

    #[tokio::test]
    async fn residents_cannot_approve() {
        let mut gateway = MockGateway::new();
        gateway.expect_approve_request().never();

        let approve = ApproveRequest {
            assigned_to: Assignee::new("Ravi").unwrap(),
        };
        let result = approve_request(
            &gateway,
            &RoleContext::from(Role::Resident),
            &pending(),
            &approve,
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn complete_requires_an_approved_record() {
        let mut gateway = MockGateway::new();
        gateway.expect_complete_request().never();

        let result =
            complete_request(&gateway, &RoleContext::from(Role::Officer), &pending()).await;
        assert!(matches!(result, Err(ServiceError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn anonymous_search_is_refused() {
        let gateway = MockGateway::new();
        let result = search_requests(
            &gateway,
            &RoleContext::default(),
            &RequestQuery::TypeStatus {
                service: ServiceType::Plumber,
                status: RequestStatus::Pending,
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}

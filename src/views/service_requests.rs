//! View-model of the service requests page.

use crate::domain::feedback::NewRequestFeedback;
use crate::domain::role::RoleContext;
use crate::domain::service_request::{
    NewServiceRequest, RequestBuckets, ServiceRequest, ServiceType, TimeSlot,
};
use crate::domain::types::RequestId;
use crate::facets::{
    FacetCatalog, FacetSelection, FacetValue, RequestQuery, apply_request_selection,
    service_facet_values, status_facet_values,
};
use crate::forms::service_requests::{
    ApprovePayload, ApproveRequestForm, RequestFeedbackForm, RescheduleRequest,
    RescheduleRequestForm, SubmitRequestForm,
};
use crate::gateway::{FeedbackWriter, ServiceRequestReader, ServiceRequestWriter};
use crate::services::service_requests as requests_service;
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::workflow::{
    DialogState, Mutation, Notification, Notifications, RefreshScope, RequestCounts, Transition,
    run_dialog_mutation, run_mutation,
};

pub struct ServiceRequestsView<'a, G: ?Sized> {
    gateway: &'a G,
    role: RoleContext,
    capabilities: CapabilitySet,
    buckets: RequestBuckets,
    /// Rows currently displayed; search results replace it.
    listing: Vec<ServiceRequest>,
    counts: RequestCounts,
    service_facet: FacetCatalog,
    status_facet: FacetCatalog,
    slot_facet: FacetCatalog,
    time_slots: Vec<TimeSlot>,
    pub selection: FacetSelection,
    pub submit_dialog: DialogState<SubmitRequestForm>,
    pub reschedule_dialog: DialogState<RescheduleRequestForm>,
    pub approve_dialog: DialogState<ApproveRequestForm>,
    pub feedback_dialog: DialogState<RequestFeedbackForm>,
    busy: bool,
    notifications: Notifications,
}

impl<'a, G> ServiceRequestsView<'a, G>
where
    G: ServiceRequestReader + ServiceRequestWriter + FeedbackWriter + ?Sized,
{
    pub fn activate(gateway: &'a G, role: RoleContext, initial: Option<RequestBuckets>) -> Self {
        let mut view = Self {
            gateway,
            role,
            capabilities: CapabilitySet::resolve(&role),
            buckets: RequestBuckets::default(),
            listing: Vec::new(),
            counts: RequestCounts::default(),
            service_facet: FacetCatalog::new(service_facet_values()),
            status_facet: FacetCatalog::new(status_facet_values()),
            slot_facet: FacetCatalog::default(),
            time_slots: Vec::new(),
            selection: FacetSelection::default(),
            submit_dialog: DialogState::default(),
            reschedule_dialog: DialogState::default(),
            approve_dialog: DialogState::default(),
            feedback_dialog: DialogState::default(),
            busy: false,
            notifications: Notifications::default(),
        };
        view.replace_buckets(initial.unwrap_or_default());
        view
    }

    pub fn role(&self) -> &RoleContext {
        &self.role
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn buckets(&self) -> &RequestBuckets {
        &self.buckets
    }

    pub fn listing(&self) -> &[ServiceRequest] {
        &self.listing
    }

    pub fn counts(&self) -> RequestCounts {
        self.counts
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn service_facet(&self) -> &FacetCatalog {
        &self.service_facet
    }

    pub fn status_facet(&self) -> &FacetCatalog {
        &self.status_facet
    }

    pub fn slot_facet(&self) -> &FacetCatalog {
        &self.slot_facet
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn narrow_services(&mut self, query: &str) -> &[FacetValue] {
        self.service_facet.narrow(query)
    }

    pub fn narrow_statuses(&mut self, query: &str) -> &[FacetValue] {
        self.status_facet.narrow(query)
    }

    pub fn narrow_slots(&mut self, query: &str) -> &[FacetValue] {
        self.slot_facet.narrow(query)
    }

    fn replace_buckets(&mut self, buckets: RequestBuckets) {
        self.counts = RequestCounts::from(&buckets);
        self.listing = buckets.all();
        self.buckets = buckets;
    }

    /// Re-fetches the listing of `scope`. Failures keep the current listing.
    pub async fn refresh(&mut self, scope: RefreshScope) {
        match requests_service::fetch_buckets(self.gateway, scope).await {
            Ok(buckets) => self.replace_buckets(buckets),
            Err(err) => log::error!("Failed to refresh service requests: {err}"),
        }
    }

    /// Runs the service/status search and resets the selection.
    pub async fn search(&mut self) {
        match apply_request_selection(&self.selection) {
            RequestQuery::Unfiltered => {
                self.busy = true;
                let result = match requests_service::scope_for(&self.role) {
                    Ok(scope) => requests_service::fetch_buckets(self.gateway, scope).await,
                    Err(err) => Err(err),
                };
                self.busy = false;
                match result {
                    Ok(buckets) => self.replace_buckets(buckets),
                    Err(err) => {
                        log::error!("Failed to search service requests: {err}");
                        self.notifications
                            .push(Notification::error("Error in searching requests."));
                    }
                }
            }
            query @ RequestQuery::TypeStatus { .. } => {
                self.busy = true;
                let result =
                    requests_service::search_requests(self.gateway, &self.role, &query).await;
                self.busy = false;
                match result {
                    Ok(listing) => self.listing = listing,
                    Err(err) => {
                        log::error!("Failed to search service requests: {err}");
                        self.notifications
                            .push(Notification::error("Error in searching requests."));
                    }
                }
            }
        }
        self.selection.clear();
    }

    fn find(&self, id: &RequestId) -> Option<&ServiceRequest> {
        self.listing
            .iter()
            .find(|request| &request.id == id)
            .or_else(|| self.buckets.find(id))
    }

    /// The record `transition` would act on, if the role and record state allow it.
    fn checked_record(&self, transition: Transition, id: &RequestId) -> Option<ServiceRequest> {
        if !self.capabilities.permit(transition.capability()) {
            return None;
        }
        let Some(record) = self.find(id) else {
            log::warn!("Request {id} is not in the current listing");
            return None;
        };
        match transition.check(&self.role, Some(record)) {
            Ok(()) => Some(record.clone()),
            Err(err) => {
                log::warn!("Ignoring {transition} on request {id}: {err}");
                None
            }
        }
    }

    async fn load_time_slots(&mut self, service: &ServiceType) {
        self.busy = true;
        let result = requests_service::list_time_slots(self.gateway, &self.role, service).await;
        self.busy = false;
        match result {
            Ok(slots) => {
                self.slot_facet.replace(
                    slots
                        .iter()
                        .map(|slot| FacetValue::from(slot.label.as_str()))
                        .collect(),
                );
                self.time_slots = slots;
            }
            Err(err) => {
                log::error!("Failed to fetch time slots for {service}: {err}");
                self.slot_facet.replace(Vec::new());
                self.time_slots.clear();
            }
        }
    }

    /// Position of the slot labelled `label` in the fetched slot list.
    pub fn slot_index(&self, label: &str) -> Option<usize> {
        self.time_slots.iter().position(|slot| slot.label == label)
    }

    pub fn open_submit_dialog(&mut self) {
        if self.capabilities.permit(Capability::SubmitRequest) {
            self.submit_dialog.open();
        }
    }

    /// Picks the service in the new-request dialog and loads its free slots.
    pub async fn choose_service(&mut self, service: &str) {
        if !self.capabilities.permit(Capability::SubmitRequest) {
            return;
        }
        let service_type = match service.parse::<ServiceType>() {
            Ok(service_type) => service_type,
            Err(err) => {
                log::debug!("Ignoring service choice `{service}`: {err}");
                return;
            }
        };
        let draft = self.submit_dialog.draft_mut();
        draft.service_type = service_type.label().to_string();
        draft.slot_index = None;
        self.load_time_slots(&service_type).await;
    }

    /// Stores the chosen slot in whichever slot dialog is open.
    pub fn select_slot(&mut self, label: &str) {
        let index = self.slot_index(label);
        if index.is_none() {
            log::debug!("Unknown time slot `{label}`");
        }
        if self.reschedule_dialog.is_visible() {
            self.reschedule_dialog.draft_mut().slot_index = index;
        } else {
            self.submit_dialog.draft_mut().slot_index = index;
        }
    }

    pub async fn submit_request(&mut self) {
        if !self.capabilities.permit(Capability::SubmitRequest) {
            return;
        }
        let request = match NewServiceRequest::try_from(self.submit_dialog.draft().clone()) {
            Ok(request) => request,
            Err(err) => {
                log::debug!("Skipping request submission: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &Mutation::from(Transition::Submit),
            &mut self.busy,
            &mut self.submit_dialog,
            &mut self.notifications,
            requests_service::submit_request(gateway, &role, &request),
        )
        .await;
        if done.is_some() {
            self.refresh(Transition::Submit.refresh_scope()).await;
        }
    }

    pub async fn open_reschedule_dialog(&mut self, id: &RequestId) {
        let Some(record) = self.checked_record(Transition::Reschedule, id) else {
            return;
        };
        self.reschedule_dialog.open_with(RescheduleRequestForm {
            request_id: record.id.to_string(),
            service_type: record.service_type.label().to_string(),
            slot_index: None,
        });
        self.load_time_slots(&record.service_type).await;
    }

    pub async fn reschedule_request(&mut self) {
        if !self.capabilities.permit(Capability::RescheduleRequest) {
            return;
        }
        let reschedule = match RescheduleRequest::try_from(self.reschedule_dialog.draft().clone())
        {
            Ok(reschedule) => reschedule,
            Err(err) => {
                log::debug!("Skipping reschedule: {err}");
                return;
            }
        };
        let Some(record) = self.checked_record(Transition::Reschedule, &reschedule.id) else {
            return;
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &Mutation::from(Transition::Reschedule),
            &mut self.busy,
            &mut self.reschedule_dialog,
            &mut self.notifications,
            requests_service::reschedule_request(gateway, &role, &record, reschedule.slot),
        )
        .await;
        if done.is_some() {
            self.refresh(Transition::Reschedule.refresh_scope()).await;
        }
    }

    pub fn open_approve_dialog(&mut self, id: &RequestId) {
        if let Some(record) = self.checked_record(Transition::Approve, id) {
            self.approve_dialog.open_with(ApproveRequestForm {
                request_id: record.id.to_string(),
                assigned_to: String::new(),
            });
        }
    }

    pub async fn approve_request(&mut self) {
        if !self.capabilities.permit(Capability::ApproveRequest) {
            return;
        }
        let payload = match ApprovePayload::try_from(self.approve_dialog.draft().clone()) {
            Ok(payload) => payload,
            Err(err) => {
                log::debug!("Skipping approval: {err}");
                return;
            }
        };
        let Some(record) = self.checked_record(Transition::Approve, &payload.id) else {
            return;
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &Mutation::from(Transition::Approve),
            &mut self.busy,
            &mut self.approve_dialog,
            &mut self.notifications,
            requests_service::approve_request(gateway, &role, &record, &payload.approve),
        )
        .await;
        if done.is_some() {
            self.refresh(Transition::Approve.refresh_scope()).await;
        }
    }

    pub async fn complete_request(&mut self, id: &RequestId) {
        let Some(record) = self.checked_record(Transition::Complete, id) else {
            return;
        };
        let gateway = self.gateway;
        let role = self.role;
        let done = run_mutation(
            &Mutation::from(Transition::Complete),
            &mut self.busy,
            &mut self.notifications,
            requests_service::complete_request(gateway, &role, &record),
        )
        .await;
        if done.is_some() {
            self.refresh(Transition::Complete.refresh_scope()).await;
        }
    }

    pub async fn cancel_request(&mut self, id: &RequestId) {
        let Some(record) = self.checked_record(Transition::Cancel, id) else {
            return;
        };
        let gateway = self.gateway;
        let role = self.role;
        let done = run_mutation(
            &Mutation::from(Transition::Cancel),
            &mut self.busy,
            &mut self.notifications,
            requests_service::cancel_request(gateway, &role, &record),
        )
        .await;
        if done.is_some() {
            self.refresh(Transition::Cancel.refresh_scope()).await;
        }
    }

    pub fn open_feedback_dialog(&mut self, id: &RequestId) {
        if let Some(record) = self.checked_record(Transition::AttachFeedback, id) {
            self.feedback_dialog.open_with(RequestFeedbackForm {
                request_id: record.id.to_string(),
                ..RequestFeedbackForm::default()
            });
        }
    }

    pub async fn give_feedback(&mut self) {
        if !self.capabilities.permit(Capability::GiveFeedback) {
            return;
        }
        let feedback = match NewRequestFeedback::try_from(self.feedback_dialog.draft().clone()) {
            Ok(feedback) => feedback,
            Err(err) => {
                log::debug!("Skipping feedback: {err}");
                return;
            }
        };
        let Some(record) = self.checked_record(Transition::AttachFeedback, &feedback.request_id)
        else {
            return;
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &Mutation::from(Transition::AttachFeedback),
            &mut self.busy,
            &mut self.feedback_dialog,
            &mut self.notifications,
            requests_service::give_request_feedback(gateway, &role, &record, &feedback),
        )
        .await;
        if done.is_some() {
            self.refresh(Transition::AttachFeedback.refresh_scope()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::domain::role::Role;
    use crate::domain::service_request::RequestStatus;
    use crate::facets::FacetDimension;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;
    use crate::workflow::Severity;

    fn request(id: &str, status: RequestStatus) -> ServiceRequest {
        ServiceRequest {
            id: RequestId::new(id).unwrap(),
            status,
            service_type: ServiceType::Plumber,
            assigned_to: None,
            timeslot: Some("09:00 - 10:00".into()),
            slot_id: None,
            resident_id: None,
            resident_name: Some("Asha Rao".into()),
            flat: Some("A-101".into()),
            date: None,
            feedback_given: false,
        }
    }

    fn buckets() -> RequestBuckets {
        RequestBuckets {
            pending: Some(vec![request("R1", RequestStatus::Pending)]),
            approved: Some(vec![request("R2", RequestStatus::Approved)]),
            completed: Some(vec![request("R3", RequestStatus::Completed)]),
        }
    }

    fn slots() -> Vec<TimeSlot> {
        ["09:00 - 10:00", "10:00 - 11:00", "11:00 - 12:00"]
            .into_iter()
            .map(|label| TimeSlot {
                label: label.into(),
            })
            .collect()
    }

    #[tokio::test]
    async fn resident_submits_request_with_one_based_slot() {
        let mut gateway = MockGateway::new();
        let mut seq = Sequence::new();
        gateway
            .expect_list_time_slots()
            .withf(|service| *service == ServiceType::Plumber)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(slots()));
        gateway
            .expect_create_request()
            .withf(|request| {
                request.service_type.wire_name() == "plumber" && request.slot.get() == 3
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_list_resident_requests()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(buckets()));

        let role = RoleContext::from(Role::Resident);
        let mut view = ServiceRequestsView::activate(&gateway, role, None);
        view.open_submit_dialog();
        view.choose_service("Plumber").await;
        view.select_slot("11:00 - 12:00");
        view.submit_request().await;

        assert!(!view.is_busy());
        assert!(!view.submit_dialog.is_visible());
        assert_eq!(view.submit_dialog.draft(), &SubmitRequestForm::default());
        assert_eq!(view.counts().total, 3);
        assert_eq!(
            view.notifications().last().unwrap().severity,
            Severity::Success
        );
    }

    #[tokio::test]
    async fn incomplete_submission_makes_no_call() {
        let mut gateway = MockGateway::new();
        gateway.expect_create_request().never();

        let role = RoleContext::from(Role::Resident);
        let mut view = ServiceRequestsView::activate(&gateway, role, None);
        view.open_submit_dialog();
        view.submit_dialog.draft_mut().service_type = "Plumber".into();
        view.submit_request().await;

        assert!(view.submit_dialog.is_visible());
        assert!(view.notifications().is_empty());
    }

    #[tokio::test]
    async fn blank_assignee_keeps_approve_dialog_open() {
        let mut gateway = MockGateway::new();
        gateway.expect_approve_request().never();

        let role = RoleContext::from(Role::Officer);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.open_approve_dialog(&RequestId::new("R1").unwrap());
        assert!(view.approve_dialog.is_visible());

        view.approve_request().await;

        assert!(view.approve_dialog.is_visible());
        assert_eq!(view.approve_dialog.draft().request_id, "R1");
        assert!(view.notifications().is_empty());
    }

    #[tokio::test]
    async fn failed_approval_still_closes_the_dialog() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_approve_request()
            .times(1)
            .returning(|_, _| Err(GatewayError::Status(500)));
        gateway.expect_list_all_requests().never();

        let role = RoleContext::from(Role::Admin);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.open_approve_dialog(&RequestId::new("R1").unwrap());
        view.approve_dialog.draft_mut().assigned_to = "Ravi".into();
        view.approve_request().await;

        assert!(!view.approve_dialog.is_visible());
        assert!(!view.is_busy());
        assert!(view.notifications().last().unwrap().is_error());
    }

    #[tokio::test]
    async fn residents_see_no_staff_controls() {
        let mut gateway = MockGateway::new();
        gateway.expect_complete_request().never();

        let role = RoleContext::from(Role::Resident);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.open_approve_dialog(&RequestId::new("R1").unwrap());
        view.complete_request(&RequestId::new("R2").unwrap()).await;

        assert!(!view.approve_dialog.is_visible());
        assert!(view.notifications().is_empty());
    }

    #[tokio::test]
    async fn completing_refreshes_the_full_listing() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_complete_request()
            .withf(|id| id.as_str() == "R2")
            .times(1)
            .returning(|_| Ok(()));
        gateway.expect_list_all_requests().times(1).returning(|| {
            Ok(RequestBuckets {
                pending: None,
                approved: Some(vec![]),
                completed: Some(vec![
                    request("R2", RequestStatus::Completed),
                    request("R3", RequestStatus::Completed),
                ]),
            })
        });

        let role = RoleContext::from(Role::Officer);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.complete_request(&RequestId::new("R2").unwrap()).await;

        assert_eq!(
            view.counts(),
            RequestCounts {
                pending: 0,
                approved: 0,
                completed: 2,
                total: 2
            }
        );
    }

    #[tokio::test]
    async fn feedback_posts_then_marks_request() {
        let mut gateway = MockGateway::new();
        let mut seq = Sequence::new();
        gateway
            .expect_submit_request_feedback()
            .withf(|f| f.request_id.as_str() == "R3" && f.rating.get() == 4)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_mark_feedback_given()
            .withf(|id| id.as_str() == "R3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_list_resident_requests()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(buckets()));

        let role = RoleContext::from(Role::Resident);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.open_feedback_dialog(&RequestId::new("R3").unwrap());
        {
            let draft = view.feedback_dialog.draft_mut();
            draft.rating = 4;
            draft.content = "Fixed the leak quickly".into();
        }
        view.give_feedback().await;

        assert!(!view.feedback_dialog.is_visible());
    }

    #[tokio::test]
    async fn stored_feedback_is_reported_even_if_flagging_fails() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_submit_request_feedback()
            .times(1)
            .returning(|_| Ok(()));
        gateway
            .expect_mark_feedback_given()
            .times(1)
            .returning(|_| Err(GatewayError::Status(500)));
        gateway
            .expect_list_resident_requests()
            .times(1)
            .returning(|| Ok(buckets()));

        let role = RoleContext::from(Role::Resident);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.open_feedback_dialog(&RequestId::new("R3").unwrap());
        {
            let draft = view.feedback_dialog.draft_mut();
            draft.rating = 5;
            draft.content = "Quick and tidy".into();
        }
        view.give_feedback().await;

        assert!(!view.feedback_dialog.is_visible());
        assert!(!view.is_busy());
        let last = view.notifications().last().unwrap();
        assert!(!last.is_error());
    }

    #[tokio::test]
    async fn failed_unfiltered_search_is_reported() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list_all_requests()
            .times(1)
            .returning(|| Err(GatewayError::Transport("down".into())));
        gateway.expect_search_requests().never();

        let role = RoleContext::from(Role::Officer);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.selection.set(FacetDimension::Service, "Plumber");
        view.search().await;

        assert!(view.selection.is_empty());
        assert_eq!(view.listing().len(), 3);
        let last = view.notifications().last().unwrap();
        assert!(last.is_error());
        assert_eq!(last.detail, "Error in searching requests.");
    }

    #[tokio::test]
    async fn search_resets_selection_even_on_failure() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_search_requests()
            .times(1)
            .returning(|_, _| Err(GatewayError::Transport("down".into())));

        let role = RoleContext::from(Role::Officer);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.selection.set(FacetDimension::Service, "Plumber");
        view.selection.set(FacetDimension::Status, "Pending");
        view.search().await;

        assert!(view.selection.is_empty());
        assert_eq!(view.listing().len(), 3);
        assert!(view.notifications().last().unwrap().is_error());
    }

    #[tokio::test]
    async fn search_by_type_and_status_replaces_listing() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_search_requests()
            .withf(|service, status| {
                *service == ServiceType::Plumber && *status == RequestStatus::Pending
            })
            .times(1)
            .returning(|_, _| Ok(vec![request("R1", RequestStatus::Pending)]));

        let role = RoleContext::from(Role::Admin);
        let mut view = ServiceRequestsView::activate(&gateway, role, Some(buckets()));
        view.selection.set(FacetDimension::Service, "plumber");
        view.selection.set(FacetDimension::Status, "Pending");
        view.search().await;

        assert_eq!(view.listing().len(), 1);
        assert_eq!(view.counts().total, 3);
        assert!(view.selection.is_empty());
    }
}

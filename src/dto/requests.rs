use serde::Serialize;

use crate::domain::service_request::ServiceRequest;
use crate::facets::{FacetSelection, FacetValue};
use crate::forms::service_requests::{
    ApproveRequestForm, RequestFeedbackForm, RescheduleRequestForm, SubmitRequestForm,
};
use crate::gateway::{FeedbackWriter, ServiceRequestReader, ServiceRequestWriter};
use crate::views::ServiceRequestsView;
use crate::views::capabilities::CapabilitySet;
use crate::workflow::{DialogState, RequestCounts};

/// Data required to render the service requests template.
#[derive(Serialize)]
pub struct RequestsPage<'a> {
    pub capabilities: &'a CapabilitySet,
    pub requests: &'a [ServiceRequest],
    pub counts: RequestCounts,
    pub service_options: &'a [FacetValue],
    pub status_options: &'a [FacetValue],
    /// Labels of the slots fetched for the open submit or reschedule dialog.
    pub slot_options: &'a [FacetValue],
    pub selection: &'a FacetSelection,
    pub submit_dialog: &'a DialogState<SubmitRequestForm>,
    pub reschedule_dialog: &'a DialogState<RescheduleRequestForm>,
    pub approve_dialog: &'a DialogState<ApproveRequestForm>,
    pub feedback_dialog: &'a DialogState<RequestFeedbackForm>,
}

impl<'a> RequestsPage<'a> {
    pub fn new<G>(view: &'a ServiceRequestsView<'_, G>) -> Self
    where
        G: ServiceRequestReader + ServiceRequestWriter + FeedbackWriter + ?Sized,
    {
        Self {
            capabilities: view.capabilities(),
            requests: view.listing(),
            counts: view.counts(),
            service_options: view.service_facet().visible(),
            status_options: view.status_facet().visible(),
            slot_options: view.slot_facet().visible(),
            selection: &view.selection,
            submit_dialog: &view.submit_dialog,
            reschedule_dialog: &view.reschedule_dialog,
            approve_dialog: &view.approve_dialog,
            feedback_dialog: &view.feedback_dialog,
        }
    }
}

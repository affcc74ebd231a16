//! View-model of the feedback page.

use crate::domain::feedback::{Feedback, NewFeedback};
use crate::domain::role::RoleContext;
use crate::forms::feedback::GiveFeedbackForm;
use crate::gateway::{FeedbackReader, FeedbackWriter};
use crate::services::feedback as feedback_service;
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::workflow::{DialogState, Mutation, Notification, Notifications, run_dialog_mutation};

const GIVE_FEEDBACK: Mutation = Mutation::new(
    "give feedback",
    "Feedback issued successfully.",
    "Error in giving feedback.",
);

pub struct FeedbackView<'a, G: ?Sized> {
    gateway: &'a G,
    role: RoleContext,
    capabilities: CapabilitySet,
    listing: Vec<Feedback>,
    pub feedback_dialog: DialogState<GiveFeedbackForm>,
    busy: bool,
    notifications: Notifications,
}

impl<'a, G> FeedbackView<'a, G>
where
    G: FeedbackReader + FeedbackWriter + ?Sized,
{
    pub fn activate(gateway: &'a G, role: RoleContext, initial: Option<Vec<Feedback>>) -> Self {
        Self {
            gateway,
            role,
            capabilities: CapabilitySet::resolve(&role),
            listing: initial.unwrap_or_default(),
            feedback_dialog: DialogState::default(),
            busy: false,
            notifications: Notifications::default(),
        }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn listing(&self) -> &[Feedback] {
        &self.listing
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

    /// Re-fetches the listing; a failure is reported and keeps the old rows.
    pub async fn refresh(&mut self) {
        self.busy = true;
        let result = feedback_service::list_feedbacks(self.gateway, &self.role).await;
        self.busy = false;
        match result {
            Ok(listing) => self.listing = listing,
            Err(err) => {
                log::error!("Failed to fetch feedbacks: {err}");
                self.notifications
                    .push(Notification::error("Error in fetching feedbacks."));
            }
        }
    }

    pub fn open_feedback_dialog(&mut self) {
        if self.capabilities.permit(Capability::GiveFeedback) {
            self.feedback_dialog.open();
        }
    }

    pub async fn give_feedback(&mut self) {
        if !self.capabilities.permit(Capability::GiveFeedback) {
            return;
        }
        let feedback = match NewFeedback::try_from(self.feedback_dialog.draft().clone()) {
            Ok(feedback) => feedback,
            Err(err) => {
                log::debug!("Skipping feedback: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &GIVE_FEEDBACK,
            &mut self.busy,
            &mut self.feedback_dialog,
            &mut self.notifications,
            feedback_service::give_feedback(gateway, &role, &feedback),
        )
        .await;
        if done.is_some() {
            self.refresh().await;
        }
    }
}

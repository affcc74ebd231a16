//! The envelope every mutating action runs in: mark busy, await the call,
//! clear busy, close the dialog per policy, queue a notification.
//!
//! Validation happens before any of this; a draft that does not convert into
//! a payload never reaches [`run_mutation`].

use std::fmt::Display;
use std::future::Future;

use crate::workflow::dialog::DialogState;
use crate::workflow::notify::{Notification, Notifications};
use crate::workflow::transition::{ClosePolicy, Transition};

/// Description of one mutating action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mutation {
    /// Verb phrase used in log lines, e.g. `approve request`.
    pub name: &'static str,
    pub close: ClosePolicy,
    pub success: &'static str,
    pub failure: &'static str,
}

impl Mutation {
    pub const fn new(name: &'static str, success: &'static str, failure: &'static str) -> Self {
        Self {
            name,
            close: ClosePolicy::OnSuccess,
            success,
            failure,
        }
    }

    #[must_use]
    pub const fn closing(mut self, close: ClosePolicy) -> Self {
        self.close = close;
        self
    }
}

impl From<Transition> for Mutation {
    fn from(transition: Transition) -> Self {
        let mutation = match transition {
            Transition::Submit => Mutation::new(
                "submit request",
                "Request submitted successfully.",
                "Error in submitting request.",
            ),
            Transition::Approve => Mutation::new(
                "approve request",
                "Request approved successfully.",
                "Error in approving request.",
            ),
            Transition::Complete => Mutation::new(
                "complete request",
                "Request marked completed successfully.",
                "Error in marking request complete.",
            ),
            Transition::Reschedule => Mutation::new(
                "reschedule request",
                "Request rescheduled successfully.",
                "Error in rescheduling request.",
            ),
            Transition::Cancel => Mutation::new(
                "cancel request",
                "Request deleted successfully.",
                "Error in deleting service request.",
            ),
            Transition::AttachFeedback => Mutation::new(
                "give feedback",
                "Feedback issued successfully.",
                "Error in giving feedback.",
            ),
        };
        match transition.close_policy() {
            Some(policy) => mutation.closing(policy),
            None => mutation,
        }
    }
}

/// Runs `call` with the busy flag raised and reports the outcome.
pub async fn run_mutation<T, E, Fut>(
    mutation: &Mutation,
    busy: &mut bool,
    notifications: &mut Notifications,
    call: Fut,
) -> Option<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    *busy = true;
    let outcome = call.await;
    *busy = false;

    match outcome {
        Ok(value) => {
            notifications.push(Notification::success(mutation.success));
            Some(value)
        }
        Err(err) => {
            log::error!("Failed to {}: {err}", mutation.name);
            notifications.push(Notification::error(mutation.failure));
            None
        }
    }
}

/// [`run_mutation`] for actions triggered from a dialog.
pub async fn run_dialog_mutation<D, T, E, Fut>(
    mutation: &Mutation,
    busy: &mut bool,
    dialog: &mut DialogState<D>,
    notifications: &mut Notifications,
    call: Fut,
) -> Option<T>
where
    D: Default,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let outcome = run_mutation(mutation, busy, notifications, call).await;
    let close = match mutation.close {
        ClosePolicy::Always => true,
        ClosePolicy::OnSuccess => outcome.is_some(),
    };
    if close {
        dialog.close();
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::notify::Severity;

    fn open_dialog() -> DialogState<String> {
        let mut dialog = DialogState::default();
        dialog.open_with("draft".to_string());
        dialog
    }

    #[tokio::test]
    async fn success_closes_dialog_and_clears_busy() {
        let mut busy = false;
        let mut dialog = open_dialog();
        let mut notifications = Notifications::default();

        let result = run_dialog_mutation(
            &Mutation::from(Transition::Submit),
            &mut busy,
            &mut dialog,
            &mut notifications,
            async { Ok::<_, String>(7) },
        )
        .await;

        assert_eq!(result, Some(7));
        assert!(!busy);
        assert!(!dialog.is_visible());
        assert!(dialog.draft().is_empty());
        assert_eq!(notifications.last().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn on_success_policy_keeps_dialog_open_after_failure() {
        let mut busy = false;
        let mut dialog = open_dialog();
        let mut notifications = Notifications::default();

        let result = run_dialog_mutation(
            &Mutation::from(Transition::Reschedule),
            &mut busy,
            &mut dialog,
            &mut notifications,
            async { Err::<(), _>("boom") },
        )
        .await;

        assert!(result.is_none());
        assert!(!busy);
        assert!(dialog.is_visible());
        assert_eq!(dialog.draft(), "draft");
        assert_eq!(
            notifications.last().unwrap().detail,
            "Error in rescheduling request."
        );
    }

    #[tokio::test]
    async fn always_policy_closes_dialog_after_failure() {
        let mut busy = false;
        let mut dialog = open_dialog();
        let mut notifications = Notifications::default();

        run_dialog_mutation(
            &Mutation::from(Transition::Approve),
            &mut busy,
            &mut dialog,
            &mut notifications,
            async { Err::<(), _>("rejected") },
        )
        .await;

        assert!(!dialog.is_visible());
        assert!(notifications.last().unwrap().is_error());
    }
}

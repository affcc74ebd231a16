//! Role-gated transitions of a [`ServiceRequest`].
//!
//! ```text
//! Pending --approve--> Approved --complete--> Completed --feedback--> Completed
//!    |  \--reschedule--> Pending
//!    \--cancel--> (removed)
//! ```

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::role::RoleContext;
use crate::domain::service_request::{RequestStatus, ServiceRequest};
use crate::views::capabilities::{Capability, CapabilitySet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    Submit,
    Approve,
    Complete,
    Reschedule,
    Cancel,
    AttachFeedback,
}

/// Listing re-fetched after a successful transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshScope {
    /// The signed-in resident's own requests.
    Resident,
    /// Every request in the society.
    All,
}

/// When the dialog that triggered an action is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosePolicy {
    OnSuccess,
    Always,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTransition {
    #[error("the current role may not {0} requests")]
    NotPermitted(Transition),

    #[error("cannot {transition} a {actual} request; it must be {expected}")]
    WrongStatus {
        transition: Transition,
        expected: RequestStatus,
        actual: RequestStatus,
    },

    #[error("{0} needs an existing request")]
    MissingRecord(Transition),

    #[error("feedback was already given for this request")]
    FeedbackAlreadyGiven,

    #[error("cannot move a request from {from} back to {to}")]
    Backward {
        from: RequestStatus,
        to: RequestStatus,
    },
}

impl Transition {
    pub const ALL: [Transition; 6] = [
        Transition::Submit,
        Transition::Approve,
        Transition::Complete,
        Transition::Reschedule,
        Transition::Cancel,
        Transition::AttachFeedback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Approve => "approve",
            Transition::Complete => "complete",
            Transition::Reschedule => "reschedule",
            Transition::Cancel => "cancel",
            Transition::AttachFeedback => "give feedback on",
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Transition::Submit => Capability::SubmitRequest,
            Transition::Approve => Capability::ApproveRequest,
            Transition::Complete => Capability::CompleteRequest,
            Transition::Reschedule => Capability::RescheduleRequest,
            Transition::Cancel => Capability::CancelRequest,
            Transition::AttachFeedback => Capability::GiveFeedback,
        }
    }

    /// Status the record must be in; `None` for [`Transition::Submit`].
    pub fn required_status(self) -> Option<RequestStatus> {
        match self {
            Transition::Submit => None,
            Transition::Approve | Transition::Reschedule | Transition::Cancel => {
                Some(RequestStatus::Pending)
            }
            Transition::Complete => Some(RequestStatus::Approved),
            Transition::AttachFeedback => Some(RequestStatus::Completed),
        }
    }

    pub fn refresh_scope(self) -> RefreshScope {
        match self {
            Transition::Approve | Transition::Complete => RefreshScope::All,
            Transition::Submit
            | Transition::Reschedule
            | Transition::Cancel
            | Transition::AttachFeedback => RefreshScope::Resident,
        }
    }

    /// Complete and cancel are triggered from the listing without a dialog.
    pub fn close_policy(self) -> Option<ClosePolicy> {
        match self {
            Transition::Submit | Transition::Reschedule => Some(ClosePolicy::OnSuccess),
            Transition::Approve | Transition::AttachFeedback => Some(ClosePolicy::Always),
            Transition::Complete | Transition::Cancel => None,
        }
    }

    pub fn is_allowed(self, role: &RoleContext) -> bool {
        CapabilitySet::resolve(role).allows(self.capability())
    }

    /// Checks the role and the record state before any remote call.
    pub fn check(
        self,
        role: &RoleContext,
        record: Option<&ServiceRequest>,
    ) -> Result<(), InvalidTransition> {
        if !self.is_allowed(role) {
            return Err(InvalidTransition::NotPermitted(self));
        }

        let Some(expected) = self.required_status() else {
            return Ok(());
        };
        let record = record.ok_or(InvalidTransition::MissingRecord(self))?;
        if record.status != expected {
            return Err(InvalidTransition::WrongStatus {
                transition: self,
                expected,
                actual: record.status,
            });
        }
        if self == Transition::AttachFeedback && record.feedback_given {
            return Err(InvalidTransition::FeedbackAlreadyGiven);
        }
        Ok(())
    }

    /// Local post-state of `record`; `None` when the request is removed.
    pub fn apply(self, record: &ServiceRequest) -> Result<Option<ServiceRequest>, InvalidTransition> {
        if let Some(expected) = self.required_status() {
            if record.status != expected {
                return Err(InvalidTransition::WrongStatus {
                    transition: self,
                    expected,
                    actual: record.status,
                });
            }
        }

        let mut next = record.clone();
        match self {
            Transition::Submit => return Err(InvalidTransition::MissingRecord(self)),
            Transition::Cancel => return Ok(None),
            Transition::Approve => next.status = RequestStatus::Approved,
            Transition::Complete => next.status = RequestStatus::Completed,
            Transition::Reschedule => {}
            Transition::AttachFeedback => next.feedback_given = true,
        }

        if next.status < record.status {
            return Err(InvalidTransition::Backward {
                from: record.status,
                to: next.status,
            });
        }
        Ok(Some(next))
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

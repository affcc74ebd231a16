//! Service request lifecycle and the machinery shared by every mutating view action.

pub mod action;
pub mod counts;
pub mod dialog;
pub mod notify;
pub mod transition;

pub use action::{Mutation, run_dialog_mutation, run_mutation};
pub use counts::RequestCounts;
pub use dialog::DialogState;
pub use notify::{Notification, Notifications, Severity};
pub use transition::{ClosePolicy, InvalidTransition, RefreshScope, Transition};

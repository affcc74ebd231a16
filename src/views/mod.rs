//! Page view-models.
//!
//! A view is activated with the data its resolver pre-fetched and a snapshot
//! of the caller's role. Every action takes `&mut self`, so one view runs one
//! mutation at a time.

pub mod capabilities;
pub mod feedback;
pub mod invoices;
pub mod login;
pub mod notices;
pub mod period;
pub mod profile;
pub mod service_requests;
pub mod users;

pub use capabilities::{Capability, CapabilitySet};
pub use feedback::FeedbackView;
pub use invoices::InvoicesView;
pub use login::{AuthTab, LoginView};
pub use notices::NoticesView;
pub use period::PeriodListing;
pub use profile::ProfileView;
pub use service_requests::ServiceRequestsView;
pub use users::{MemberCounts, UsersView};

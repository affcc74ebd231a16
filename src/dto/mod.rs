//! Serializable page snapshots handed to the templates.

pub mod account;
pub mod listings;
pub mod requests;

pub use account::{LoginPage, MemberRow, ProfilePage, UsersPage};
pub use listings::{FeedbackPage, InvoicesPage, NoticesPage, PeriodPage};
pub use requests::RequestsPage;

//! Domain aggregates exposed by the society portal service layer.

pub mod auth;
pub mod feedback;
pub mod invoice;
pub mod notice;
pub mod role;
pub mod service_request;
pub mod types;
pub mod user;

//! Wire models exchanged with the society backend.

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod envelope;
pub mod feedback;
pub mod invoice;
pub mod notice;
pub mod service_request;
pub mod user;

//! Resident feedback operations.

use crate::domain::feedback::{Feedback, NewFeedback};
use crate::domain::role::RoleContext;
use crate::gateway::{FeedbackReader, FeedbackWriter};
use crate::services::{ServiceResult, ensure_capability, ensure_signed_in};
use crate::views::capabilities::Capability;

pub async fn list_feedbacks<G>(gateway: &G, role: &RoleContext) -> ServiceResult<Vec<Feedback>>
where
    G: FeedbackReader + ?Sized,
{
    ensure_signed_in(role)?;
    Ok(gateway.list_feedbacks().await?)
}

/// General feedback about the society, not tied to a request.
pub async fn give_feedback<G>(
    gateway: &G,
    role: &RoleContext,
    feedback: &NewFeedback,
) -> ServiceResult<()>
where
    G: FeedbackWriter + ?Sized,
{
    ensure_capability(role, Capability::GiveFeedback)?;
    gateway.submit_feedback(feedback).await?;
    Ok(())
}

//! Society notice board operations.

use crate::domain::notice::{NewNotice, Notice};
use crate::domain::role::RoleContext;
use crate::facets::PeriodQuery;
use crate::gateway::{NoticeReader, NoticeWriter};
use crate::services::{ServiceResult, ensure_capability, ensure_signed_in};
use crate::views::capabilities::Capability;

pub async fn list_notices<G>(gateway: &G, role: &RoleContext) -> ServiceResult<Vec<Notice>>
where
    G: NoticeReader + ?Sized,
{
    ensure_signed_in(role)?;
    Ok(gateway.list_notices().await?)
}

pub async fn search_notices<G>(
    gateway: &G,
    role: &RoleContext,
    query: &PeriodQuery,
) -> ServiceResult<Vec<Notice>>
where
    G: NoticeReader + ?Sized,
{
    ensure_signed_in(role)?;
    Ok(gateway.search_notices(query).await?)
}

pub async fn issue_notice<G>(gateway: &G, role: &RoleContext, notice: &NewNotice) -> ServiceResult<()>
where
    G: NoticeWriter + ?Sized,
{
    ensure_capability(role, Capability::IssueNotice)?;
    gateway.issue_notice(notice).await?;
    Ok(())
}

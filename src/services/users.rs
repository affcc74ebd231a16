//! Society membership administration.

use crate::domain::role::RoleContext;
use crate::domain::types::UserId;
use crate::domain::user::{NewOfficer, SocietyUser};
use crate::gateway::{SocietyReader, SocietyWriter};
use crate::services::{ServiceResult, ensure_capability};
use crate::views::capabilities::Capability;

pub async fn list_residents<G>(gateway: &G, role: &RoleContext) -> ServiceResult<Vec<SocietyUser>>
where
    G: SocietyReader + ?Sized,
{
    ensure_capability(role, Capability::ManageUsers)?;
    Ok(gateway.list_residents().await?)
}

pub async fn list_officers<G>(gateway: &G, role: &RoleContext) -> ServiceResult<Vec<SocietyUser>>
where
    G: SocietyReader + ?Sized,
{
    ensure_capability(role, Capability::ManageUsers)?;
    Ok(gateway.list_officers().await?)
}

pub async fn add_officer<G>(gateway: &G, role: &RoleContext, officer: &NewOfficer) -> ServiceResult<()>
where
    G: SocietyWriter + ?Sized,
{
    ensure_capability(role, Capability::ManageUsers)?;
    gateway.add_officer(officer).await?;
    Ok(())
}

pub async fn delete_officer<G>(gateway: &G, role: &RoleContext, id: &UserId) -> ServiceResult<()>
where
    G: SocietyWriter + ?Sized,
{
    ensure_capability(role, Capability::ManageUsers)?;
    gateway.delete_officer(id).await?;
    Ok(())
}

pub async fn delete_resident<G>(gateway: &G, role: &RoleContext, id: &UserId) -> ServiceResult<()>
where
    G: SocietyWriter + ?Sized,
{
    ensure_capability(role, Capability::ManageUsers)?;
    gateway.delete_resident(id).await?;
    Ok(())
}

//! Operations on the signed-in user's own profile.

use crate::domain::role::RoleContext;
use crate::domain::user::{PasswordChange, Profile, UpdateProfile};
use crate::gateway::{ProfileReader, ProfileWriter};
use crate::services::{ServiceResult, ensure_signed_in};

pub async fn get_profile<G>(gateway: &G, role: &RoleContext) -> ServiceResult<Profile>
where
    G: ProfileReader + ?Sized,
{
    ensure_signed_in(role)?;
    Ok(gateway.get_profile().await?)
}

pub async fn update_profile<G>(
    gateway: &G,
    role: &RoleContext,
    update: &UpdateProfile,
) -> ServiceResult<()>
where
    G: ProfileWriter + ?Sized,
{
    ensure_signed_in(role)?;
    gateway.update_profile(update).await?;
    Ok(())
}

pub async fn change_password<G>(
    gateway: &G,
    role: &RoleContext,
    change: &PasswordChange,
) -> ServiceResult<()>
where
    G: ProfileWriter + ?Sized,
{
    ensure_signed_in(role)?;
    gateway.change_password(change).await?;
    Ok(())
}

pub async fn delete_profile<G>(gateway: &G, role: &RoleContext) -> ServiceResult<()>
where
    G: ProfileWriter + ?Sized,
{
    ensure_signed_in(role)?;
    gateway.delete_profile().await?;
    Ok(())
}

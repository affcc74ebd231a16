//! Login and resident self-registration.

use crate::domain::auth::{Credentials, LoginSession};
use crate::domain::user::NewResident;
use crate::gateway::AuthGateway;
use crate::services::ServiceResult;
use crate::session::SessionStore;

/// Authenticates and stores the returned token, email and role in `session`.
pub async fn login<G, S>(
    gateway: &G,
    session: &mut S,
    credentials: &Credentials,
) -> ServiceResult<LoginSession>
where
    G: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    let login = gateway.login(credentials).await?;
    session.login_user(&login);
    Ok(login)
}

pub async fn signup<G>(gateway: &G, resident: &NewResident) -> ServiceResult<()>
where
    G: AuthGateway + ?Sized,
{
    gateway.signup(resident).await?;
    Ok(())
}

//! Session and role context of the signed-in user.

use crate::domain::auth::LoginSession;
use crate::domain::role::{Role, RoleContext};

/// Storage for the token and identity returned by the backend at login.
///
/// Views only read from it; [`SessionStore::login_user`] and
/// [`SessionStore::logout_user`] are the only writers.
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    fn email(&self) -> Option<String>;
    fn role(&self) -> Option<Role>;
    fn login_user(&mut self, login: &LoginSession);
    fn logout_user(&mut self);

    fn role_context(&self) -> RoleContext {
        RoleContext::new(self.role())
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    fn is_officer(&self) -> bool {
        self.role() == Some(Role::Officer)
    }

    fn is_resident(&self) -> bool {
        self.role() == Some(Role::Resident)
    }
}

/// Process-local session, used by tests and non-web callers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemorySession {
    token: Option<String>,
    email: Option<String>,
    role: Option<Role>,
}

impl SessionStore for InMemorySession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn email(&self) -> Option<String> {
        self.email.clone()
    }

    fn role(&self) -> Option<Role> {
        self.role
    }

    fn login_user(&mut self, login: &LoginSession) {
        self.token = Some(login.token.clone());
        self.email = Some(login.email.clone());
        self.role = Some(login.role);
    }

    fn logout_user(&mut self) {
        *self = Self::default();
    }
}

/// Cookie-backed session of the web server.
#[cfg(feature = "server")]
mod cookie {
    use actix_session::Session;
    use serde::de::DeserializeOwned;

    use super::SessionStore;
    use crate::domain::auth::LoginSession;
    use crate::domain::role::Role;

    const TOKEN_KEY: &str = "token";
    const EMAIL_KEY: &str = "email";
    const ROLE_KEY: &str = "role";

    fn read<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
        session.get::<T>(key).unwrap_or_else(|err| {
            log::warn!("Failed to read `{key}` from the session: {err}");
            None
        })
    }

    impl SessionStore for Session {
        fn token(&self) -> Option<String> {
            read(self, TOKEN_KEY)
        }

        fn email(&self) -> Option<String> {
            read(self, EMAIL_KEY)
        }

        fn role(&self) -> Option<Role> {
            read(self, ROLE_KEY)
        }

        fn login_user(&mut self, login: &LoginSession) {
            let stored = self
                .insert(TOKEN_KEY, &login.token)
                .and_then(|()| self.insert(EMAIL_KEY, &login.email))
                .and_then(|()| self.insert(ROLE_KEY, login.role));
            if let Err(err) = stored {
                log::error!("Failed to store the login session: {err}");
            }
        }

        fn logout_user(&mut self) {
            self.purge();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logout_forgets_everything() {
        let mut session = InMemorySession::default();
        session.login_user(&LoginSession {
            token: "t".into(),
            email: "officer@example.com".into(),
            role: Role::Officer,
        });
        assert!(session.is_authenticated());
        assert!(session.role_context().is_officer);

        session.logout_user();
        assert!(!session.is_authenticated());
        assert_eq!(session.role_context(), RoleContext::default());
    }
}

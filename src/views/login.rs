//! View-model of the login and signup page.

use serde::Serialize;

use crate::domain::auth::Credentials;
use crate::domain::user::NewResident;
use crate::forms::auth::{LoginForm, SignupForm};
use crate::gateway::AuthGateway;
use crate::services::auth as auth_service;
use crate::session::SessionStore;
use crate::workflow::{Notification, Notifications};

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}

pub struct LoginView<'a, G: ?Sized> {
    gateway: &'a G,
    pub login_form: LoginForm,
    pub signup_form: SignupForm,
    pub active_tab: AuthTab,
    /// Inline message shown under the active form.
    error_message: Option<String>,
    busy: bool,
    notifications: Notifications,
}

impl<'a, G> LoginView<'a, G>
where
    G: AuthGateway + ?Sized,
{
    pub fn activate(gateway: &'a G) -> Self {
        Self {
            gateway,
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            active_tab: AuthTab::default(),
            error_message: None,
            busy: false,
            notifications: Notifications::default(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Authenticates and stores the session. Returns whether the user is now signed in.
    pub async fn login<S>(&mut self, session: &mut S) -> bool
    where
        S: SessionStore + ?Sized,
    {
        let credentials = match Credentials::try_from(self.login_form.clone()) {
            Ok(credentials) => credentials,
            Err(err) => {
                log::debug!("Skipping login: {err}");
                return false;
            }
        };

        self.busy = true;
        let result = auth_service::login(self.gateway, session, &credentials).await;
        self.busy = false;
        match result {
            Ok(login) => {
                log::info!("{} signed in as {}", login.email, login.role);
                self.error_message = None;
                self.notifications
                    .push(Notification::success("User logged in successfully"));
                true
            }
            Err(err) => {
                log::error!("Failed to log in: {err}");
                self.error_message = Some("Invalid credentials".to_string());
                self.notifications
                    .push(Notification::error("Invalid Credentials"));
                false
            }
        }
    }

    /// Registers a resident and switches back to the login tab on success.
    pub async fn signup(&mut self) -> bool {
        let resident = match NewResident::try_from(self.signup_form.clone()) {
            Ok(resident) => resident,
            Err(err) => {
                log::debug!("Skipping signup: {err}");
                return false;
            }
        };

        self.busy = true;
        let result = auth_service::signup(self.gateway, &resident).await;
        self.busy = false;
        match result {
            Ok(()) => {
                self.signup_form = SignupForm::default();
                self.active_tab = AuthTab::Login;
                self.error_message = None;
                self.notifications
                    .push(Notification::success("Sign Up successful."));
                true
            }
            Err(err) => {
                log::error!("Failed to sign up: {err}");
                self.error_message = Some("Invalid details".to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::LoginSession;
    use crate::domain::role::Role;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;
    use crate::session::InMemorySession;

    #[tokio::test]
    async fn login_stores_token_email_and_role() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_login()
            .withf(|credentials| credentials.email.as_str() == "admin@example.com")
            .times(1)
            .returning(|_| {
                Ok(LoginSession {
                    token: "jwt".into(),
                    email: "admin@example.com".into(),
                    role: Role::Admin,
                })
            });

        let mut session = InMemorySession::default();
        let mut view = LoginView::activate(&gateway);
        view.login_form = LoginForm {
            email: "admin@example.com".into(),
            password: "pw".into(),
        };

        assert!(view.login(&mut session).await);
        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert!(session.is_admin());
        assert_eq!(
            view.notifications().last().unwrap().detail,
            "User logged in successfully"
        );
    }

    #[tokio::test]
    async fn rejected_login_sets_inline_error() {
        let mut gateway = MockGateway::new();
        gateway.expect_login().times(1).returning(|_| {
            Err(GatewayError::Rejected {
                message: "bad password".into(),
                code: None,
            })
        });

        let mut session = InMemorySession::default();
        let mut view = LoginView::activate(&gateway);
        view.login_form = LoginForm {
            email: "admin@example.com".into(),
            password: "wrong".into(),
        };

        assert!(!view.login(&mut session).await);
        assert!(!session.is_authenticated());
        assert_eq!(view.error_message(), Some("Invalid credentials"));
        assert!(!view.is_busy());
    }

    #[tokio::test]
    async fn signup_switches_to_login_tab() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_signup()
            .withf(|resident| resident.flat.as_str() == "C-303")
            .times(1)
            .returning(|_| Ok(()));

        let mut view = LoginView::activate(&gateway);
        view.active_tab = AuthTab::Signup;
        view.signup_form = SignupForm {
            first_name: "Meera".into(),
            middle_name: String::new(),
            last_name: "Iyer".into(),
            email: "meera@example.com".into(),
            mobile: "9876543210".into(),
            flat: "C-303".into(),
            password: "pw".into(),
        };

        assert!(view.signup().await);
        assert_eq!(view.active_tab, AuthTab::Login);
        assert_eq!(view.signup_form, SignupForm::default());
    }

    #[tokio::test]
    async fn malformed_email_skips_the_call() {
        let mut gateway = MockGateway::new();
        gateway.expect_login().never();

        let mut session = InMemorySession::default();
        let mut view = LoginView::activate(&gateway);
        view.login_form.email = "not-an-email".into();
        view.login_form.password = "pw".into();

        assert!(!view.login(&mut session).await);
        assert!(view.error_message().is_none());
    }
}

//! View-model of the signed-in user's profile page.
//!
//! Changing the email, changing the password and deleting the profile all
//! end the session on success; the caller redirects to the login page when
//! [`ProfileView::signed_out`] is set.

use crate::domain::role::RoleContext;
use crate::domain::user::{PasswordChange, Profile, UpdateProfile};
use crate::forms::profile::{ChangePasswordForm, UpdateProfileForm};
use crate::gateway::{ProfileReader, ProfileWriter};
use crate::services::profile as profile_service;
use crate::session::SessionStore;
use crate::workflow::{DialogState, Mutation, Notifications, run_dialog_mutation};

const UPDATE_PROFILE: Mutation = Mutation::new(
    "update profile",
    "Profile updated successfully.",
    "Error in updating profile.",
);

const CHANGE_PASSWORD: Mutation = Mutation::new(
    "change password",
    "Password changed successfully.",
    "Error in changing password.",
);

const DELETE_PROFILE: Mutation = Mutation::new(
    "delete profile",
    "Profile deleted successfully.",
    "Error in deleting profile.",
);

pub struct ProfileView<'a, G: ?Sized> {
    gateway: &'a G,
    role: RoleContext,
    profile: Option<Profile>,
    pub update_dialog: DialogState<UpdateProfileForm>,
    pub password_dialog: DialogState<ChangePasswordForm>,
    pub delete_dialog: DialogState<()>,
    busy: bool,
    signed_out: bool,
    notifications: Notifications,
}

impl<'a, G> ProfileView<'a, G>
where
    G: ProfileReader + ProfileWriter + ?Sized,
{
    pub fn activate(gateway: &'a G, role: RoleContext, initial: Option<Profile>) -> Self {
        Self {
            gateway,
            role,
            profile: initial,
            update_dialog: DialogState::default(),
            password_dialog: DialogState::default(),
            delete_dialog: DialogState::default(),
            busy: false,
            signed_out: false,
            notifications: Notifications::default(),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The last action ended the session.
    pub fn signed_out(&self) -> bool {
        self.signed_out
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub async fn refresh(&mut self) {
        match profile_service::get_profile(self.gateway, &self.role).await {
            Ok(profile) => self.profile = Some(profile),
            Err(err) => log::error!("Failed to fetch profile: {err}"),
        }
    }

    fn sign_out<S: SessionStore + ?Sized>(&mut self, session: &mut S) {
        session.logout_user();
        self.signed_out = true;
    }

    pub async fn update_profile<S>(&mut self, session: &mut S)
    where
        S: SessionStore + ?Sized,
    {
        let update = match UpdateProfile::try_from(self.update_dialog.draft().clone()) {
            Ok(update) => update,
            Err(err) => {
                log::debug!("Skipping profile update: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &UPDATE_PROFILE,
            &mut self.busy,
            &mut self.update_dialog,
            &mut self.notifications,
            profile_service::update_profile(gateway, &role, &update),
        )
        .await;
        if done.is_none() {
            return;
        }
        if update.changes_email() {
            self.sign_out(session);
        } else {
            self.refresh().await;
        }
    }

    pub async fn change_password<S>(&mut self, session: &mut S)
    where
        S: SessionStore + ?Sized,
    {
        let change = match PasswordChange::try_from(self.password_dialog.draft().clone()) {
            Ok(change) => change,
            Err(err) => {
                log::debug!("Skipping password change: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &CHANGE_PASSWORD,
            &mut self.busy,
            &mut self.password_dialog,
            &mut self.notifications,
            profile_service::change_password(gateway, &role, &change),
        )
        .await;
        if done.is_some() {
            self.sign_out(session);
        }
    }

    pub async fn delete_profile<S>(&mut self, session: &mut S)
    where
        S: SessionStore + ?Sized,
    {
        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &DELETE_PROFILE,
            &mut self.busy,
            &mut self.delete_dialog,
            &mut self.notifications,
            profile_service::delete_profile(gateway, &role),
        )
        .await;
        if done.is_some() {
            self.sign_out(session);
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

    fn signed_in() -> InMemorySession {
        let mut session = InMemorySession::default();
        session.login_user(&LoginSession {
            token: "token".into(),
            email: "asha@example.com".into(),
            role: Role::Resident,
        });
        session
    }

    fn profile() -> Profile {
        Profile {
            first_name: Some("Asha".into()),
            middle_name: None,
            last_name: Some("Rao".into()),
            email: Some("asha@example.com".into()),
            mobile: None,
            flat: Some("A-101".into()),
            role: Some("resident".into()),
        }
    }

    #[tokio::test]
    async fn password_change_ends_the_session() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_change_password()
            .withf(|change| change.new_password.as_str() == "n3w")
            .times(1)
            .returning(|_| Ok(()));

        let mut session = signed_in();
        let mut view = ProfileView::activate(&gateway, session.role_context(), Some(profile()));
        view.password_dialog.open_with(ChangePasswordForm {
            old_password: "old".into(),
            new_password: "n3w".into(),
            confirm_password: "n3w".into(),
        });
        view.change_password(&mut session).await;

        assert!(view.signed_out());
        assert!(!session.is_authenticated());
        assert!(!view.password_dialog.is_visible());
    }

    #[tokio::test]
    async fn mismatched_confirmation_makes_no_call() {
        let mut gateway = MockGateway::new();
        gateway.expect_change_password().never();

        let mut session = signed_in();
        let mut view = ProfileView::activate(&gateway, session.role_context(), None);
        view.password_dialog.open_with(ChangePasswordForm {
            old_password: "old".into(),
            new_password: "n3w".into(),
            confirm_password: "other".into(),
        });
        view.change_password(&mut session).await;

        assert!(session.is_authenticated());
        assert!(view.password_dialog.is_visible());
    }

    #[tokio::test]
    async fn name_change_keeps_session_and_refetches() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_update_profile()
            .withf(|update| update.email.is_none() && update.first_name.is_some())
            .times(1)
            .returning(|_| Ok(()));
        gateway
            .expect_get_profile()
            .times(1)
            .returning(|| Ok(Profile {
                first_name: Some("Ashwini".into()),
                ..profile()
            }));

        let mut session = signed_in();
        let mut view = ProfileView::activate(&gateway, session.role_context(), Some(profile()));
        view.update_dialog.open();
        view.update_dialog.draft_mut().first_name = "Ashwini".into();
        view.update_profile(&mut session).await;

        assert!(!view.signed_out());
        assert!(session.is_authenticated());
        assert_eq!(
            view.profile().and_then(|p| p.first_name.as_deref()),
            Some("Ashwini")
        );
    }

    #[tokio::test]
    async fn email_change_ends_the_session() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_update_profile()
            .times(1)
            .returning(|_| Ok(()));
        gateway.expect_get_profile().never();

        let mut session = signed_in();
        let mut view = ProfileView::activate(&gateway, session.role_context(), Some(profile()));
        view.update_dialog.open();
        view.update_dialog.draft_mut().email = "asha.rao@example.com".into();
        view.update_profile(&mut session).await;

        assert!(view.signed_out());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn blank_update_makes_no_call() {
        let mut gateway = MockGateway::new();
        gateway.expect_update_profile().never();

        let mut session = signed_in();
        let mut view = ProfileView::activate(&gateway, session.role_context(), None);
        view.update_dialog.open();
        view.update_profile(&mut session).await;

        assert!(view.update_dialog.is_visible());
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_session() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_delete_profile()
            .times(1)
            .returning(|| Err(GatewayError::Status(500)));

        let mut session = signed_in();
        let mut view = ProfileView::activate(&gateway, session.role_context(), None);
        view.delete_dialog.open();
        view.delete_profile(&mut session).await;

        assert!(!view.signed_out());
        assert!(session.is_authenticated());
        assert!(view.notifications().last().unwrap().is_error());
    }
}

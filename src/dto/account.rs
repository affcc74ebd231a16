use serde::Serialize;

use crate::domain::user::{Profile, SocietyUser};
use crate::gateway::{AuthGateway, ProfileReader, ProfileWriter, SocietyReader, SocietyWriter};
use crate::views::capabilities::CapabilitySet;
use crate::views::{AuthTab, LoginView, MemberCounts, ProfileView, UsersView};

#[derive(Serialize)]
pub struct ProfilePage<'a> {
    pub profile: Option<&'a Profile>,
    pub update_dialog_visible: bool,
    pub password_dialog_visible: bool,
    pub delete_dialog_visible: bool,
}

impl<'a> ProfilePage<'a> {
    pub fn new<G>(view: &'a ProfileView<'_, G>) -> Self
    where
        G: ProfileReader + ProfileWriter + ?Sized,
    {
        Self {
            profile: view.profile(),
            update_dialog_visible: view.update_dialog.is_visible(),
            password_dialog_visible: view.password_dialog.is_visible(),
            delete_dialog_visible: view.delete_dialog.is_visible(),
        }
    }
}

/// Row of the residents or officers table.
#[derive(Serialize)]
pub struct MemberRow<'a> {
    pub id: &'a str,
    pub name: String,
    pub email: Option<&'a str>,
    pub mobile: Option<&'a str>,
    pub flat: Option<&'a str>,
}

impl<'a> From<&'a SocietyUser> for MemberRow<'a> {
    fn from(user: &'a SocietyUser) -> Self {
        Self {
            id: user.id.as_str(),
            name: user.display_name(),
            email: user.email.as_deref(),
            mobile: user.mobile.as_deref(),
            flat: user.flat.as_deref(),
        }
    }
}

#[derive(Serialize)]
pub struct UsersPage<'a> {
    pub capabilities: &'a CapabilitySet,
    pub residents: Vec<MemberRow<'a>>,
    pub officers: Vec<MemberRow<'a>>,
    pub counts: MemberCounts,
    pub officer_dialog_visible: bool,
}

impl<'a> UsersPage<'a> {
    pub fn new<G>(view: &'a UsersView<'_, G>) -> Self
    where
        G: SocietyReader + SocietyWriter + ?Sized,
    {
        Self {
            capabilities: view.capabilities(),
            residents: view.residents().iter().map(MemberRow::from).collect(),
            officers: view.officers().iter().map(MemberRow::from).collect(),
            counts: view.counts(),
            officer_dialog_visible: view.officer_dialog.is_visible(),
        }
    }
}

#[derive(Serialize)]
pub struct LoginPage<'a> {
    pub active_tab: AuthTab,
    pub error_message: Option<&'a str>,
    pub email: &'a str,
}

impl<'a> LoginPage<'a> {
    pub fn new<G>(view: &'a LoginView<'_, G>) -> Self
    where
        G: AuthGateway + ?Sized,
    {
        Self {
            active_tab: view.active_tab,
            error_message: view.error_message(),
            email: &view.login_form.email,
        }
    }
}

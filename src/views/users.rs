//! View-model of the user management page.

use serde::Serialize;

use crate::domain::role::RoleContext;
use crate::domain::types::UserId;
use crate::domain::user::{NewOfficer, SocietyUser};
use crate::forms::users::AddOfficerForm;
use crate::gateway::{SocietyReader, SocietyWriter};
use crate::resolvers::SocietyData;
use crate::services::users as users_service;
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::workflow::{DialogState, Mutation, Notifications, run_dialog_mutation, run_mutation};

const ADD_OFFICER: Mutation = Mutation::new(
    "add officer",
    "Officer added successfully.",
    "Error in adding officer to the system.",
);

const DELETE_RESIDENT: Mutation =
    Mutation::new("delete resident", "Deletion Successful", "Error in deletion");

const DELETE_OFFICER: Mutation =
    Mutation::new("delete officer", "Deletion successful.", "Error in deletion.");

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct MemberCounts {
    pub residents: usize,
    pub officers: usize,
}

pub struct UsersView<'a, G: ?Sized> {
    gateway: &'a G,
    role: RoleContext,
    capabilities: CapabilitySet,
    residents: Vec<SocietyUser>,
    officers: Vec<SocietyUser>,
    pub officer_dialog: DialogState<AddOfficerForm>,
    busy: bool,
    notifications: Notifications,
}

impl<'a, G> UsersView<'a, G>
where
    G: SocietyReader + SocietyWriter + ?Sized,
{
    pub fn activate(gateway: &'a G, role: RoleContext, initial: SocietyData) -> Self {
        Self {
            gateway,
            role,
            capabilities: CapabilitySet::resolve(&role),
            residents: initial.residents.unwrap_or_default(),
            officers: initial.officers.unwrap_or_default(),
            officer_dialog: DialogState::default(),
            busy: false,
            notifications: Notifications::default(),
        }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn residents(&self) -> &[SocietyUser] {
        &self.residents
    }

    pub fn officers(&self) -> &[SocietyUser] {
        &self.officers
    }

    pub fn counts(&self) -> MemberCounts {
        MemberCounts {
            residents: self.residents.len(),
            officers: self.officers.len(),
        }
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

    pub async fn refresh_residents(&mut self) {
        match users_service::list_residents(self.gateway, &self.role).await {
            Ok(residents) => self.residents = residents,
            Err(err) => log::error!("Failed to fetch residents: {err}"),
        }
    }

    pub async fn refresh_officers(&mut self) {
        match users_service::list_officers(self.gateway, &self.role).await {
            Ok(officers) => self.officers = officers,
            Err(err) => log::error!("Failed to fetch officers: {err}"),
        }
    }

    pub fn open_officer_dialog(&mut self) {
        if self.capabilities.permit(Capability::ManageUsers) {
            self.officer_dialog.open();
        }
    }

    pub async fn add_officer(&mut self) {
        if !self.capabilities.permit(Capability::ManageUsers) {
            return;
        }
        let officer = match NewOfficer::try_from(self.officer_dialog.draft().clone()) {
            Ok(officer) => officer,
            Err(err) => {
                log::debug!("Skipping new officer: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &ADD_OFFICER,
            &mut self.busy,
            &mut self.officer_dialog,
            &mut self.notifications,
            users_service::add_officer(gateway, &role, &officer),
        )
        .await;
        if done.is_some() {
            self.refresh_officers().await;
        }
    }

    pub async fn delete_resident(&mut self, id: &UserId) {
        if !self.capabilities.permit(Capability::ManageUsers) {
            return;
        }
        let gateway = self.gateway;
        let role = self.role;
        let done = run_mutation(
            &DELETE_RESIDENT,
            &mut self.busy,
            &mut self.notifications,
            users_service::delete_resident(gateway, &role, id),
        )
        .await;
        if done.is_some() {
            self.refresh_residents().await;
        }
    }

    pub async fn delete_officer(&mut self, id: &UserId) {
        if !self.capabilities.permit(Capability::ManageUsers) {
            return;
        }
        let gateway = self.gateway;
        let role = self.role;
        let done = run_mutation(
            &DELETE_OFFICER,
            &mut self.busy,
            &mut self.notifications,
            users_service::delete_officer(gateway, &role, id),
        )
        .await;
        if done.is_some() {
            self.refresh_officers().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;

    fn user(id: &str) -> SocietyUser {
        SocietyUser {
            id: UserId::new(id).unwrap(),
            first_name: Some("Ravi".into()),
            middle_name: None,
            last_name: Some("Kumar".into()),
            email: Some(format!("{id}@example.com")),
            mobile: None,
            flat: None,
        }
    }

    fn society() -> SocietyData {
        SocietyData {
            residents: Some(vec![user("1"), user("2")]),
            officers: None,
        }
    }

    #[tokio::test]
    async fn counts_follow_listings() {
        let gateway = MockGateway::new();
        let view = UsersView::activate(&gateway, RoleContext::from(Role::Admin), society());
        assert_eq!(
            view.counts(),
            MemberCounts {
                residents: 2,
                officers: 0
            }
        );
    }

    #[tokio::test]
    async fn adding_officer_refreshes_officers() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_add_officer()
            .withf(|officer| officer.email.as_str() == "guard@example.com")
            .times(1)
            .returning(|_| Ok(()));
        gateway
            .expect_list_officers()
            .times(1)
            .returning(|| Ok(vec![user("9")]));

        let mut view = UsersView::activate(&gateway, RoleContext::from(Role::Admin), society());
        view.open_officer_dialog();
        {
            let draft = view.officer_dialog.draft_mut();
            draft.email = "guard@example.com".into();
            draft.password = "secret".into();
        }
        view.add_officer().await;

        assert_eq!(view.counts().officers, 1);
        assert!(!view.officer_dialog.is_visible());
        assert_eq!(
            view.notifications().last().unwrap().detail,
            "Officer added successfully."
        );
    }

    #[tokio::test]
    async fn failed_resident_delete_keeps_listing() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_delete_resident()
            .withf(|id| id.as_str() == "2")
            .times(1)
            .returning(|_| Err(GatewayError::Status(500)));
        gateway.expect_list_residents().never();

        let mut view = UsersView::activate(&gateway, RoleContext::from(Role::Admin), society());
        view.delete_resident(&UserId::new("2").unwrap()).await;

        assert_eq!(view.residents().len(), 2);
        assert_eq!(view.notifications().last().unwrap().detail, "Error in deletion");
    }

    #[tokio::test]
    async fn officers_cannot_manage_users() {
        let mut gateway = MockGateway::new();
        gateway.expect_delete_officer().never();

        let mut view = UsersView::activate(&gateway, RoleContext::from(Role::Officer), society());
        view.delete_officer(&UserId::new("1").unwrap()).await;

        assert!(view.notifications().is_empty());
    }
}

//! Permissions a view needs, resolved once from the role context.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

use crate::domain::role::{Role, RoleContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    SubmitRequest,
    ApproveRequest,
    CompleteRequest,
    RescheduleRequest,
    CancelRequest,
    /// Feedback on a completed request and general society feedback.
    GiveFeedback,
    ViewAllRequests,
    IssueInvoice,
    IssueNotice,
    ManageUsers,
}

const ADMIN: &[Capability] = &[
    Capability::ApproveRequest,
    Capability::CompleteRequest,
    Capability::ViewAllRequests,
    Capability::IssueInvoice,
    Capability::IssueNotice,
    Capability::ManageUsers,
];

const OFFICER: &[Capability] = &[
    Capability::ApproveRequest,
    Capability::CompleteRequest,
    Capability::ViewAllRequests,
    Capability::IssueNotice,
];

const RESIDENT: &[Capability] = &[
    Capability::SubmitRequest,
    Capability::RescheduleRequest,
    Capability::CancelRequest,
    Capability::GiveFeedback,
];

/// Capabilities granted to the current role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet(HashSet<Capability>);

impl CapabilitySet {
    pub fn resolve(role: &RoleContext) -> Self {
        let granted = match role.role {
            Some(Role::Admin) => ADMIN,
            Some(Role::Officer) => OFFICER,
            Some(Role::Resident) => RESIDENT,
            None => &[],
        };
        Self(granted.iter().copied().collect())
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Returns whether the capability is granted, logging a hidden-control call otherwise.
    pub fn permit(&self, capability: Capability) -> bool {
        let allowed = self.allows(capability);
        if !allowed {
            log::warn!("Ignoring {capability:?}: not granted to the current role");
        }
        allowed
    }
}

/// Serialized as a `{capability: bool}` map so templates can test flags by name.
impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        const ALL: [Capability; 10] = [
            Capability::SubmitRequest,
            Capability::ApproveRequest,
            Capability::CompleteRequest,
            Capability::RescheduleRequest,
            Capability::CancelRequest,
            Capability::GiveFeedback,
            Capability::ViewAllRequests,
            Capability::IssueInvoice,
            Capability::IssueNotice,
            Capability::ManageUsers,
        ];

        let mut map = serializer.serialize_map(Some(ALL.len()))?;
        for capability in ALL {
            map.serialize_entry(&capability, &self.allows(capability))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn officers_cannot_manage_users_or_invoices() {
        let officer = CapabilitySet::resolve(&RoleContext::from(Role::Officer));
        assert!(officer.allows(Capability::ApproveRequest));
        assert!(officer.allows(Capability::IssueNotice));
        assert!(!officer.allows(Capability::IssueInvoice));
        assert!(!officer.allows(Capability::ManageUsers));
        assert!(!officer.allows(Capability::SubmitRequest));
    }

    #[test]
    fn residents_only_drive_their_own_requests() {
        let resident = CapabilitySet::resolve(&RoleContext::from(Role::Resident));
        assert!(resident.allows(Capability::SubmitRequest));
        assert!(resident.allows(Capability::GiveFeedback));
        assert!(!resident.allows(Capability::ApproveRequest));
        assert!(!resident.allows(Capability::ViewAllRequests));
    }

    #[test]
    fn anonymous_users_get_nothing() {
        let none = CapabilitySet::resolve(&RoleContext::default());
        assert!(!none.permit(Capability::ManageUsers));
    }

    #[test]
    fn serializes_as_flag_map() {
        let admin = CapabilitySet::resolve(&RoleContext::from(Role::Admin));
        let value = serde_json::to_value(&admin).unwrap();
        assert_eq!(value["manage_users"], true);
        assert_eq!(value["submit_request"], false);
    }
}

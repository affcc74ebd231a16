//! View-model of the notice board.

use crate::domain::notice::{NewNotice, Notice};
use crate::domain::role::RoleContext;
use crate::facets::PeriodQuery;
use crate::forms::notices::IssueNoticeForm;
use crate::gateway::{NoticeReader, NoticeWriter};
use crate::services::notices as notices_service;
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::views::period::PeriodListing;
use crate::workflow::{DialogState, Mutation, Notification, Notifications, run_dialog_mutation};

const ISSUE_NOTICE: Mutation = Mutation::new(
    "issue notice",
    "Notice issued successfully.",
    "Error in issuing notice.",
);

pub struct NoticesView<'a, G: ?Sized> {
    gateway: &'a G,
    role: RoleContext,
    capabilities: CapabilitySet,
    pub period: PeriodListing<Notice>,
    pub issue_dialog: DialogState<IssueNoticeForm>,
    busy: bool,
    notifications: Notifications,
}

impl<'a, G> NoticesView<'a, G>
where
    G: NoticeReader + NoticeWriter + ?Sized,
{
    pub fn activate(gateway: &'a G, role: RoleContext, initial: Option<Vec<Notice>>) -> Self {
        Self {
            gateway,
            role,
            capabilities: CapabilitySet::resolve(&role),
            period: PeriodListing::new(initial.unwrap_or_default()),
            issue_dialog: DialogState::default(),
            busy: false,
            notifications: Notifications::default(),
        }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn listing(&self) -> &[Notice] {
        self.period.listing()
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

    pub async fn refresh(&mut self) {
        match notices_service::list_notices(self.gateway, &self.role).await {
            Ok(notices) => self.period.replace(notices),
            Err(err) => log::error!("Failed to refresh notices: {err}"),
        }
    }

    /// Runs the year/month search and resets the selection. Failures keep the listing.
    pub async fn search(&mut self) {
        self.busy = true;
        match self.period.query() {
            PeriodQuery::All => self.refresh().await,
            query => match notices_service::search_notices(self.gateway, &self.role, &query).await
            {
                Ok(notices) => self.period.show(notices),
                Err(err) => {
                    log::error!("Failed to search notices: {err}");
                    self.notifications
                        .push(Notification::error("Error in searching notices."));
                }
            },
        }
        self.busy = false;
        self.period.selection.clear();
    }

    pub fn open_issue_dialog(&mut self) {
        if self.capabilities.permit(Capability::IssueNotice) {
            self.issue_dialog.open();
        }
    }

    pub async fn issue_notice(&mut self) {
        if !self.capabilities.permit(Capability::IssueNotice) {
            return;
        }
        let notice = match NewNotice::try_from(self.issue_dialog.draft().clone()) {
            Ok(notice) => notice,
            Err(err) => {
                log::debug!("Skipping notice: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &ISSUE_NOTICE,
            &mut self.busy,
            &mut self.issue_dialog,
            &mut self.notifications,
            notices_service::issue_notice(gateway, &role, &notice),
        )
        .await;
        if done.is_some() {
            self.refresh().await;
        }
    }
}

//! View-model of the invoices page.

use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::role::RoleContext;
use crate::facets::PeriodQuery;
use crate::forms::invoices::IssueInvoiceForm;
use crate::gateway::{InvoiceReader, InvoiceWriter};
use crate::services::invoices as invoices_service;
use crate::views::capabilities::{Capability, CapabilitySet};
use crate::views::period::PeriodListing;
use crate::workflow::{DialogState, Mutation, Notification, Notifications, run_dialog_mutation};

const ISSUE_INVOICE: Mutation = Mutation::new(
    "issue invoice",
    "Invoice issued successfully.",
    "Error in issuing invoice.",
);

pub struct InvoicesView<'a, G: ?Sized> {
    gateway: &'a G,
    role: RoleContext,
    capabilities: CapabilitySet,
    pub period: PeriodListing<Invoice>,
    pub issue_dialog: DialogState<IssueInvoiceForm>,
    busy: bool,
    notifications: Notifications,
}

impl<'a, G> InvoicesView<'a, G>
where
    G: InvoiceReader + InvoiceWriter + ?Sized,
{
    pub fn activate(gateway: &'a G, role: RoleContext, initial: Option<Vec<Invoice>>) -> Self {
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

    pub fn listing(&self) -> &[Invoice] {
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
        match invoices_service::list_invoices(self.gateway, &self.role).await {
            Ok(invoices) => self.period.replace(invoices),
            Err(err) => log::error!("Failed to refresh invoices: {err}"),
        }
    }

    /// Runs the year/month search and resets the selection.
    ///
    /// A failed month search empties the listing; a failed year search keeps it.
    pub async fn search(&mut self) {
        self.busy = true;
        match self.period.query() {
            PeriodQuery::All => self.refresh().await,
            query => {
                match invoices_service::search_invoices(self.gateway, &self.role, &query).await {
                    Ok(invoices) => self.period.show(invoices),
                    Err(err) => {
                        log::error!("Failed to search invoices: {err}");
                        if matches!(query, PeriodQuery::YearMonth { .. }) {
                            self.period.show(Vec::new());
                        }
                        self.notifications
                            .push(Notification::error("Error in searching invoices."));
                    }
                }
            }
        }
        self.busy = false;
        self.period.selection.clear();
    }

    pub fn open_issue_dialog(&mut self) {
        if self.capabilities.permit(Capability::IssueInvoice) {
            self.issue_dialog.open();
        }
    }

    pub async fn issue_invoice(&mut self) {
        if !self.capabilities.permit(Capability::IssueInvoice) {
            return;
        }
        let invoice = match NewInvoice::try_from(self.issue_dialog.draft().clone()) {
            Ok(invoice) => invoice,
            Err(err) => {
                log::debug!("Skipping invoice: {err}");
                return;
            }
        };

        let gateway = self.gateway;
        let role = self.role;
        let done = run_dialog_mutation(
            &ISSUE_INVOICE,
            &mut self.busy,
            &mut self.issue_dialog,
            &mut self.notifications,
            invoices_service::issue_invoice(gateway, &role, &invoice),
        )
        .await;
        if done.is_some() {
            self.refresh().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::facets::FacetDimension;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;

    fn invoice(year: &str, month: &str) -> Invoice {
        Invoice {
            id: None,
            amount: 1500.0,
            month: month.into(),
            year: year.into(),
            status: Some("Unpaid".into()),
            resident_name: None,
            flat: Some("B-202".into()),
        }
    }

    fn listing() -> Vec<Invoice> {
        vec![invoice("2024", "January"), invoice("2024", "February")]
    }

    #[tokio::test]
    async fn non_positive_amount_makes_no_call() {
        let mut gateway = MockGateway::new();
        gateway.expect_issue_invoice().never();

        let mut view = InvoicesView::activate(&gateway, RoleContext::from(Role::Admin), None);
        view.open_issue_dialog();
        view.issue_dialog.draft_mut().amount = 0.0;
        view.issue_invoice().await;

        assert!(view.issue_dialog.is_visible());
        assert!(view.notifications().is_empty());
    }

    #[tokio::test]
    async fn officers_cannot_open_the_issue_dialog() {
        let gateway = MockGateway::new();
        let mut view = InvoicesView::activate(&gateway, RoleContext::from(Role::Officer), None);
        view.open_issue_dialog();
        assert!(!view.issue_dialog.is_visible());
    }

    #[tokio::test]
    async fn issuing_refreshes_listing_and_facets() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_issue_invoice()
            .withf(|invoice| invoice.amount.get() == 1500.0)
            .times(1)
            .returning(|_| Ok(()));
        gateway.expect_list_invoices().times(1).returning(|| {
            let mut invoices = listing();
            invoices.push(invoice("2025", "March"));
            Ok(invoices)
        });

        let mut view =
            InvoicesView::activate(&gateway, RoleContext::from(Role::Admin), Some(listing()));
        view.open_issue_dialog();
        view.issue_dialog.draft_mut().amount = 1500.0;
        view.issue_invoice().await;

        assert!(!view.issue_dialog.is_visible());
        assert_eq!(view.listing().len(), 3);
        assert_eq!(view.period.year_facet().master().len(), 2);
        assert_eq!(
            view.notifications().last().unwrap().detail,
            "Invoice issued successfully."
        );
    }

    #[tokio::test]
    async fn failed_month_search_empties_listing() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_search_invoices()
            .withf(|query| {
                *query
                    == PeriodQuery::YearMonth {
                        year: "2024".into(),
                        month: "January".into(),
                    }
            })
            .times(1)
            .returning(|_| Err(GatewayError::Status(500)));

        let mut view =
            InvoicesView::activate(&gateway, RoleContext::from(Role::Resident), Some(listing()));
        view.period.selection.set(FacetDimension::Year, "2024");
        view.period.selection.set(FacetDimension::Month, "January");
        view.search().await;

        assert!(view.listing().is_empty());
        assert!(view.period.selection.is_empty());
        assert!(!view.is_busy());
        assert_eq!(view.period.month_facet().master().len(), 2);
    }

    #[tokio::test]
    async fn month_without_year_reloads_everything() {
        let mut gateway = MockGateway::new();
        gateway.expect_search_invoices().never();
        gateway
            .expect_list_invoices()
            .times(1)
            .returning(|| Ok(listing()));

        let mut view = InvoicesView::activate(&gateway, RoleContext::from(Role::Resident), None);
        view.period.selection.set(FacetDimension::Month, "January");
        view.search().await;

        assert_eq!(view.listing().len(), 2);
        assert!(view.period.selection.is_empty());
    }
}

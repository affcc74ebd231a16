//! Maintenance invoice operations.

use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::role::RoleContext;
use crate::facets::PeriodQuery;
use crate::gateway::{InvoiceReader, InvoiceWriter};
use crate::services::{ServiceResult, ensure_capability, ensure_signed_in};
use crate::views::capabilities::Capability;

pub async fn list_invoices<G>(gateway: &G, role: &RoleContext) -> ServiceResult<Vec<Invoice>>
where
    G: InvoiceReader + ?Sized,
{
    ensure_signed_in(role)?;
    Ok(gateway.list_invoices().await?)
}

pub async fn search_invoices<G>(
    gateway: &G,
    role: &RoleContext,
    query: &PeriodQuery,
) -> ServiceResult<Vec<Invoice>>
where
    G: InvoiceReader + ?Sized,
{
    ensure_signed_in(role)?;
    Ok(gateway.search_invoices(query).await?)
}

/// Issues an invoice of `invoice.amount` to every resident.
pub async fn issue_invoice<G>(
    gateway: &G,
    role: &RoleContext,
    invoice: &NewInvoice,
) -> ServiceResult<()>
where
    G: InvoiceWriter + ?Sized,
{
    ensure_capability(role, Capability::IssueInvoice)?;
    gateway.issue_invoice(invoice).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::domain::types::Amount;
    use crate::gateway::mock::MockGateway;
    use crate::services::ServiceError;

    #[tokio::test]
    async fn officers_cannot_issue_invoices() {
        let mut gateway = MockGateway::new();
        gateway.expect_issue_invoice().never();

        let invoice = NewInvoice {
            amount: Amount::new(1200.0).unwrap(),
        };
        let result = issue_invoice(&gateway, &RoleContext::from(Role::Officer), &invoice).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn admins_issue_invoices() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_issue_invoice()
            .withf(|invoice| invoice.amount.get() == 1200.0)
            .times(1)
            .returning(|_| Ok(()));

        let invoice = NewInvoice {
            amount: Amount::new(1200.0).unwrap(),
        };
        issue_invoice(&gateway, &RoleContext::from(Role::Admin), &invoice)
            .await
            .unwrap();
    }
}

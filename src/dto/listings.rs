use serde::Serialize;

use crate::domain::feedback::Feedback;
use crate::domain::invoice::Invoice;
use crate::domain::notice::Notice;
use crate::facets::{FacetValue, Faceted};
use crate::forms::feedback::GiveFeedbackForm;
use crate::forms::invoices::IssueInvoiceForm;
use crate::forms::notices::IssueNoticeForm;
use crate::gateway::{
    FeedbackReader, FeedbackWriter, InvoiceReader, InvoiceWriter, NoticeReader, NoticeWriter,
};
use crate::views::capabilities::CapabilitySet;
use crate::views::period::PeriodListing;
use crate::views::{FeedbackView, InvoicesView, NoticesView};
use crate::workflow::DialogState;

/// Rows and facet options of a year/month filtered page.
#[derive(Serialize)]
pub struct PeriodPage<'a, T, D> {
    pub capabilities: &'a CapabilitySet,
    pub rows: &'a [T],
    pub year_options: &'a [FacetValue],
    pub month_options: &'a [FacetValue],
    pub issue_dialog: &'a DialogState<D>,
}

impl<'a, T: Faceted, D> PeriodPage<'a, T, D> {
    fn new(
        capabilities: &'a CapabilitySet,
        period: &'a PeriodListing<T>,
        issue_dialog: &'a DialogState<D>,
    ) -> Self {
        Self {
            capabilities,
            rows: period.listing(),
            year_options: period.year_facet().visible(),
            month_options: period.month_facet().visible(),
            issue_dialog,
        }
    }
}

pub type InvoicesPage<'a> = PeriodPage<'a, Invoice, IssueInvoiceForm>;
pub type NoticesPage<'a> = PeriodPage<'a, Notice, IssueNoticeForm>;

impl<'a> InvoicesPage<'a> {
    pub fn from_view<G>(view: &'a InvoicesView<'_, G>) -> Self
    where
        G: InvoiceReader + InvoiceWriter + ?Sized,
    {
        Self::new(view.capabilities(), &view.period, &view.issue_dialog)
    }
}

impl<'a> NoticesPage<'a> {
    pub fn from_view<G>(view: &'a NoticesView<'_, G>) -> Self
    where
        G: NoticeReader + NoticeWriter + ?Sized,
    {
        Self::new(view.capabilities(), &view.period, &view.issue_dialog)
    }
}

#[derive(Serialize)]
pub struct FeedbackPage<'a> {
    pub capabilities: &'a CapabilitySet,
    pub feedbacks: &'a [Feedback],
    pub feedback_dialog: &'a DialogState<GiveFeedbackForm>,
}

impl<'a> FeedbackPage<'a> {
    pub fn new<G>(view: &'a FeedbackView<'_, G>) -> Self
    where
        G: FeedbackReader + FeedbackWriter + ?Sized,
    {
        Self {
            capabilities: view.capabilities(),
            feedbacks: view.listing(),
            feedback_dialog: &view.feedback_dialog,
        }
    }
}

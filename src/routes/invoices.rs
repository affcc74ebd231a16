use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::dto::InvoicesPage;
use crate::facets::FacetDimension;
use crate::forms::invoices::IssueInvoiceForm;
use crate::gateway::http::HttpGateway;
use crate::resolvers;
use crate::routes::{base_context, finish, render_template, signed_in};
use crate::views::InvoicesView;

/// Year/month search of a period listing; `issue` opens the issue dialog.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodSearchQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    #[serde(default)]
    pub issue: bool,
}

impl PeriodSearchQuery {
    pub fn is_search(&self) -> bool {
        self.year.is_some() || self.month.is_some()
    }
}

#[get("/invoices")]
pub async fn show_invoices(
    query: web::Query<PeriodSearchQuery>,
    session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let invoices = resolvers::resolve_invoices(&gateway, &role).await;
    let mut view = InvoicesView::activate(&gateway, role, invoices);
    if query.is_search() {
        if let Some(year) = &query.year {
            view.period.selection.set(FacetDimension::Year, year.as_str());
        }
        if let Some(month) = &query.month {
            view.period.selection.set(FacetDimension::Month, month.as_str());
        }
        view.search().await;
    }
    if query.issue {
        view.open_issue_dialog();
    }

    let mut context = base_context(&flash_messages, &session, "invoices");
    context.insert("notifications", view.notifications());
    context.insert("page", &InvoicesPage::from_view(&view));
    render_template(&tera, "invoices/index.html", &context)
}

#[post("/invoices/issue")]
pub async fn issue_invoice(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<IssueInvoiceForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = InvoicesView::activate(&gateway, role, None);
    view.issue_dialog.open_with(form);
    view.issue_invoice().await;
    finish(view.notifications_mut(), "/invoices")
}

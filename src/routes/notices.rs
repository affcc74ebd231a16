use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::NoticesPage;
use crate::facets::FacetDimension;
use crate::forms::notices::IssueNoticeForm;
use crate::gateway::http::HttpGateway;
use crate::resolvers;
use crate::routes::invoices::PeriodSearchQuery;
use crate::routes::{base_context, finish, render_template, signed_in};
use crate::views::NoticesView;

#[get("/notices")]
pub async fn show_notices(
    query: web::Query<PeriodSearchQuery>,
    session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let notices = resolvers::resolve_notices(&gateway, &role).await;
    let mut view = NoticesView::activate(&gateway, role, notices);
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

    let mut context = base_context(&flash_messages, &session, "notices");
    context.insert("notifications", view.notifications());
    context.insert("page", &NoticesPage::from_view(&view));
    render_template(&tera, "notices/index.html", &context)
}

#[post("/notices/issue")]
pub async fn issue_notice(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<IssueNoticeForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = NoticesView::activate(&gateway, role, None);
    view.issue_dialog.open_with(form);
    view.issue_notice().await;
    finish(view.notifications_mut(), "/notices")
}

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::RequestId;
use crate::dto::RequestsPage;
use crate::facets::FacetDimension;
use crate::forms::service_requests::RequestFeedbackForm;
use crate::gateway::http::HttpGateway;
use crate::resolvers;
use crate::routes::{HOME_PATH, base_context, finish, redirect, render_template, signed_in};
use crate::views::ServiceRequestsView;

/// Query of the listing page. Search facets and which dialog to open.
#[derive(Debug, Default, Deserialize)]
pub struct RequestsQuery {
    pub service: Option<String>,
    pub status: Option<String>,
    /// Opens the new-request dialog with the free slots of this service.
    pub new: Option<String>,
    pub reschedule: Option<String>,
    pub approve: Option<String>,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequestPayload {
    pub service_type: String,
    #[serde(default)]
    pub slot: String,
}

#[derive(Debug, Deserialize)]
pub struct RequestIdPayload {
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ApprovePayload {
    pub request_id: String,
    #[serde(default)]
    pub assigned_to: String,
}

#[derive(Debug, Deserialize)]
pub struct ReschedulePayload {
    pub request_id: String,
    #[serde(default)]
    pub slot: String,
}

fn parse_request_id(raw: &str) -> Option<RequestId> {
    match RequestId::new(raw) {
        Ok(id) => Some(id),
        Err(err) => {
            log::debug!("Ignoring request id `{raw}`: {err}");
            None
        }
    }
}

fn unknown_request() -> HttpResponse {
    FlashMessage::error("Request not found.").send();
    redirect(HOME_PATH)
}

#[get("/")]
pub async fn index() -> impl Responder {
    redirect(HOME_PATH)
}

#[get("/requests")]
pub async fn show_requests(
    query: web::Query<RequestsQuery>,
    session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let query = query.into_inner();

    let buckets = resolvers::resolve_requests(&gateway, &role).await;
    let mut view = ServiceRequestsView::activate(&gateway, role, buckets);

    if query.service.is_some() || query.status.is_some() {
        if let Some(service) = &query.service {
            view.selection.set(FacetDimension::Service, service.as_str());
        }
        if let Some(status) = &query.status {
            view.selection.set(FacetDimension::Status, status.as_str());
        }
        view.search().await;
    }

    if let Some(service) = query.new.as_deref() {
        view.open_submit_dialog();
        view.choose_service(service).await;
    } else if let Some(id) = query.reschedule.as_deref().and_then(parse_request_id) {
        view.open_reschedule_dialog(&id).await;
    } else if let Some(id) = query.approve.as_deref().and_then(parse_request_id) {
        view.open_approve_dialog(&id);
    } else if let Some(id) = query.feedback.as_deref().and_then(parse_request_id) {
        view.open_feedback_dialog(&id);
    }

    let mut context = base_context(&flash_messages, &session, "requests");
    context.insert("notifications", view.notifications());
    context.insert("page", &RequestsPage::new(&view));
    render_template(&tera, "requests/index.html", &context)
}

#[post("/requests/submit")]
pub async fn submit_request(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<SubmitRequestPayload>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = ServiceRequestsView::activate(&gateway, role, None);
    view.open_submit_dialog();
    view.choose_service(&form.service_type).await;
    view.select_slot(&form.slot);
    view.submit_request().await;
    finish(view.notifications_mut(), HOME_PATH)
}

#[post("/requests/approve")]
pub async fn approve_request(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<ApprovePayload>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Some(id) = parse_request_id(&form.request_id) else {
        return unknown_request();
    };

    let buckets = resolvers::resolve_requests(&gateway, &role).await;
    let mut view = ServiceRequestsView::activate(&gateway, role, buckets);
    view.open_approve_dialog(&id);
    view.approve_dialog.draft_mut().assigned_to = form.assigned_to;
    view.approve_request().await;
    finish(view.notifications_mut(), HOME_PATH)
}

#[post("/requests/complete")]
pub async fn complete_request(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<RequestIdPayload>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Some(id) = parse_request_id(&form.request_id) else {
        return unknown_request();
    };

    let buckets = resolvers::resolve_requests(&gateway, &role).await;
    let mut view = ServiceRequestsView::activate(&gateway, role, buckets);
    view.complete_request(&id).await;
    finish(view.notifications_mut(), HOME_PATH)
}

#[post("/requests/reschedule")]
pub async fn reschedule_request(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<ReschedulePayload>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Some(id) = parse_request_id(&form.request_id) else {
        return unknown_request();
    };

    let buckets = resolvers::resolve_requests(&gateway, &role).await;
    let mut view = ServiceRequestsView::activate(&gateway, role, buckets);
    view.open_reschedule_dialog(&id).await;
    view.select_slot(&form.slot);
    view.reschedule_request().await;
    finish(view.notifications_mut(), HOME_PATH)
}

#[post("/requests/cancel")]
pub async fn cancel_request(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<RequestIdPayload>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Some(id) = parse_request_id(&form.request_id) else {
        return unknown_request();
    };

    let buckets = resolvers::resolve_requests(&gateway, &role).await;
    let mut view = ServiceRequestsView::activate(&gateway, role, buckets);
    view.cancel_request(&id).await;
    finish(view.notifications_mut(), HOME_PATH)
}

#[post("/requests/feedback")]
pub async fn request_feedback(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<RequestFeedbackForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Some(id) = parse_request_id(&form.request_id) else {
        return unknown_request();
    };

    let buckets = resolvers::resolve_requests(&gateway, &role).await;
    let mut view = ServiceRequestsView::activate(&gateway, role, buckets);
    view.open_feedback_dialog(&id);
    if view.feedback_dialog.is_visible() {
        *view.feedback_dialog.draft_mut() = form;
    }
    view.give_feedback().await;
    finish(view.notifications_mut(), HOME_PATH)
}

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::dto::FeedbackPage;
use crate::forms::feedback::GiveFeedbackForm;
use crate::gateway::http::HttpGateway;
use crate::resolvers;
use crate::routes::{base_context, finish, render_template, signed_in};
use crate::views::FeedbackView;

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    #[serde(default)]
    pub give: bool,
}

#[get("/feedback")]
pub async fn show_feedback(
    query: web::Query<FeedbackQuery>,
    session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let feedbacks = resolvers::resolve_feedbacks(&gateway, &role).await;
    let mut view = FeedbackView::activate(&gateway, role, feedbacks);
    if query.give {
        view.open_feedback_dialog();
    }

    let mut context = base_context(&flash_messages, &session, "feedback");
    context.insert("page", &FeedbackPage::new(&view));
    render_template(&tera, "feedback/index.html", &context)
}

#[post("/feedback/give")]
pub async fn give_feedback(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<GiveFeedbackForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = FeedbackView::activate(&gateway, role, None);
    view.feedback_dialog.open_with(form);
    view.give_feedback().await;
    finish(view.notifications_mut(), "/feedback")
}

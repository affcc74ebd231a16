use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::UserId;
use crate::dto::UsersPage;
use crate::forms::users::AddOfficerForm;
use crate::gateway::http::HttpGateway;
use crate::resolvers::{self, SocietyData};
use crate::routes::{HOME_PATH, base_context, finish, redirect, render_template, signed_in};
use crate::views::UsersView;
use crate::views::capabilities::{Capability, CapabilitySet};

const USERS_PATH: &str = "/users";

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub add_officer: bool,
}

fn not_allowed() -> HttpResponse {
    FlashMessage::error("Not allowed.").send();
    redirect(HOME_PATH)
}

#[get("/users")]
pub async fn show_users(
    query: web::Query<UsersQuery>,
    session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    if !CapabilitySet::resolve(&role).allows(Capability::ManageUsers) {
        return not_allowed();
    }

    let society = resolvers::resolve_society(&gateway, &role).await;
    let mut view = UsersView::activate(&gateway, role, society);
    if query.add_officer {
        view.open_officer_dialog();
    }

    let mut context = base_context(&flash_messages, &session, "users");
    context.insert("page", &UsersPage::new(&view));
    render_template(&tera, "users/index.html", &context)
}

#[post("/users/officers/add")]
pub async fn add_officer(
    session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<AddOfficerForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = UsersView::activate(&gateway, role, SocietyData::default());
    view.officer_dialog.open_with(form);
    view.add_officer().await;
    finish(view.notifications_mut(), USERS_PATH)
}

#[post("/users/officers/{id}/delete")]
pub async fn delete_officer(
    id: web::Path<String>,
    session: Session,
    gateway: web::Data<HttpGateway>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Ok(id) = UserId::new(id.into_inner()) else {
        return redirect(USERS_PATH);
    };

    let mut view = UsersView::activate(&gateway, role, SocietyData::default());
    view.delete_officer(&id).await;
    finish(view.notifications_mut(), USERS_PATH)
}

#[post("/users/residents/{id}/delete")]
pub async fn delete_resident(
    id: web::Path<String>,
    session: Session,
    gateway: web::Data<HttpGateway>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };
    let Ok(id) = UserId::new(id.into_inner()) else {
        return redirect(USERS_PATH);
    };

    let mut view = UsersView::activate(&gateway, role, SocietyData::default());
    view.delete_resident(&id).await;
    finish(view.notifications_mut(), USERS_PATH)
}

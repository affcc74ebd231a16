use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::dto::ProfilePage;
use crate::forms::profile::{ChangePasswordForm, UpdateProfileForm};
use crate::gateway::http::HttpGateway;
use crate::gateway::{ProfileReader, ProfileWriter};
use crate::routes::{LOGIN_PATH, base_context, finish, render_template, signed_in};
use crate::services;
use crate::session::SessionStore;
use crate::views::ProfileView;

/// Which profile dialog to open.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub dialog: Option<String>,
}

/// Back to the profile page, or to the login page once the session has ended.
fn after_action<G>(view: &mut ProfileView<'_, G>, identity: Option<Identity>) -> HttpResponse
where
    G: ProfileReader + ProfileWriter + ?Sized,
{
    if view.signed_out() {
        if let Some(identity) = identity {
            identity.logout();
        }
        return finish(view.notifications_mut(), LOGIN_PATH);
    }
    finish(view.notifications_mut(), "/profile")
}

#[get("/profile")]
pub async fn show_profile(
    query: web::Query<ProfileQuery>,
    mut session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let profile = match services::profile::get_profile(&gateway, &role).await {
        Ok(profile) => Some(profile),
        Err(err) if err.is_session_expired() => {
            log::warn!("Backend rejected the session token; signing out");
            session.logout_user();
            return HttpResponse::Unauthorized().finish();
        }
        Err(err) => {
            log::error!("Failed to resolve profile: {err}");
            None
        }
    };

    let mut view = ProfileView::activate(&gateway, role, profile);
    match query.dialog.as_deref() {
        Some("update") => view.update_dialog.open(),
        Some("password") => view.password_dialog.open(),
        Some("delete") => view.delete_dialog.open(),
        _ => {}
    }

    let mut context = base_context(&flash_messages, &session, "profile");
    context.insert("page", &ProfilePage::new(&view));
    render_template(&tera, "profile/index.html", &context)
}

#[post("/profile/update")]
pub async fn update_profile(
    mut session: Session,
    identity: Option<Identity>,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<UpdateProfileForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = ProfileView::activate(&gateway, role, None);
    view.update_dialog.open_with(form);
    view.update_profile(&mut session).await;
    after_action(&mut view, identity)
}

#[post("/profile/password")]
pub async fn change_password(
    mut session: Session,
    identity: Option<Identity>,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<ChangePasswordForm>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = ProfileView::activate(&gateway, role, None);
    view.password_dialog.open_with(form);
    view.change_password(&mut session).await;
    after_action(&mut view, identity)
}

#[post("/profile/delete")]
pub async fn delete_profile(
    mut session: Session,
    identity: Option<Identity>,
    gateway: web::Data<HttpGateway>,
) -> impl Responder {
    let Some((role, gateway)) = signed_in(&session, &gateway) else {
        return HttpResponse::Unauthorized().finish();
    };

    let mut view = ProfileView::activate(&gateway, role, None);
    view.delete_dialog.open();
    view.delete_profile(&mut session).await;
    after_action(&mut view, identity)
}

//! HTTP handlers. Each request rebuilds its page view from the resolvers,
//! runs at most one action and either renders or redirects.

use actix_session::Session;
use actix_web::{HttpResponse, http::header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::role::RoleContext;
use crate::gateway::http::HttpGateway;
use crate::session::SessionStore;
use crate::workflow::{Notifications, Severity};

pub mod auth;
pub mod feedback;
pub mod invoices;
pub mod notices;
pub mod profile;
pub mod requests;
pub mod users;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/requests";

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: alerts, the signed-in user and the active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &Session,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("role", &session.role_context());
    context.insert("current_email", &session.email());
    context.insert("current_page", current_page);
    context
}

/// Forwards queued view notifications to the next page as flash messages.
pub fn flash_notifications(notifications: &mut Notifications) {
    for notification in notifications.drain() {
        match notification.severity {
            Severity::Success => FlashMessage::success(notification.detail).send(),
            Severity::Error => FlashMessage::error(notification.detail).send(),
        }
    }
}

/// Flashes the view's notifications and redirects to `location`.
pub fn finish(notifications: &mut Notifications, location: &str) -> HttpResponse {
    flash_notifications(notifications);
    redirect(location)
}

/// Role and a gateway authenticated with the session token.
///
/// `None` when nobody is signed in; handlers answer `401` and the
/// middleware turns that into a redirect to the login page.
pub fn signed_in(session: &Session, gateway: &HttpGateway) -> Option<(RoleContext, HttpGateway)> {
    let token = session.token()?;
    let role = session.role_context();
    if role.role.is_none() {
        log::warn!("Session carries a token but no role");
        return None;
    }
    Some((role, gateway.with_token(Some(&token))))
}

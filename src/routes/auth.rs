use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::dto::LoginPage;
use crate::forms::auth::{LoginForm, SignupForm};
use crate::gateway::http::HttpGateway;
use crate::routes::{
    HOME_PATH, LOGIN_PATH, base_context, finish, flash_notifications, redirect, render_template,
};
use crate::session::SessionStore;
use crate::views::{AuthTab, LoginView};

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub tab: Option<String>,
}

#[get("/login")]
pub async fn show_login(
    query: web::Query<LoginQuery>,
    session: Session,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if session.is_authenticated() {
        return redirect(HOME_PATH);
    }

    let mut view = LoginView::activate(gateway.get_ref());
    if query.tab.as_deref() == Some("signup") {
        view.active_tab = AuthTab::Signup;
    }

    let mut context = base_context(&flash_messages, &session, "login");
    context.insert("page", &LoginPage::new(&view));
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    mut session: Session,
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let mut view = LoginView::activate(gateway.get_ref());
    view.login_form = form;

    if !view.login(&mut session).await {
        if view.notifications().is_empty() {
            FlashMessage::error("Invalid Credentials").send();
        }
        return finish(view.notifications_mut(), LOGIN_PATH);
    }

    if let Some(email) = session.email() {
        if let Err(err) = Identity::login(&request.extensions(), email) {
            log::error!("Failed to attach the identity: {err}");
        }
    }
    finish(view.notifications_mut(), HOME_PATH)
}

#[post("/signup")]
pub async fn signup(
    gateway: web::Data<HttpGateway>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    let mut view = LoginView::activate(gateway.get_ref());
    view.active_tab = AuthTab::Signup;
    view.signup_form = form;

    if view.signup().await {
        return finish(view.notifications_mut(), LOGIN_PATH);
    }
    flash_notifications(view.notifications_mut());
    FlashMessage::error(view.error_message().unwrap_or("Invalid details")).send();
    redirect("/login?tab=signup")
}

#[post("/logout")]
pub async fn logout(mut session: Session, identity: Option<Identity>) -> impl Responder {
    session.logout_user();
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect(LOGIN_PATH)
}

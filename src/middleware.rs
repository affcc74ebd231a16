//! Redirects responses for signed-out users to the login page.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse};

use crate::routes::LOGIN_PATH;

/// Turns every `401 Unauthorized` into a `303 See Other` to the login page.
///
/// Wrap with `actix_web::middleware::from_fn(redirect_unauthorized)`.
pub async fn redirect_unauthorized(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let res = next.call(req).await?;
    if res.status() != StatusCode::UNAUTHORIZED {
        return Ok(res.map_into_boxed_body());
    }

    let (req, _) = res.into_parts();
    let redirect = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish();
    Ok(ServiceResponse::new(req, redirect))
}

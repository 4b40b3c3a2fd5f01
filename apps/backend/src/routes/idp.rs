//! Redirects to and from the external identity provider.

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::warn;

use crate::auth::cookies::IDP_STATE_COOKIE;
use crate::auth::{csrf, ResponseCookies};
use crate::error::AppError;
use crate::extractors::OptionalUser;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SignInQuery {
    direct_sign_in: Option<String>,
}

async fn sign_in(
    query: web::Query<SignInQuery>,
    jar: ResponseCookies,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let idp = app_state
        .idp
        .as_ref()
        .ok_or_else(|| AppError::config("identity provider is not configured"))?;

    let state = csrf::generate_token();
    let location = idp.authorize_url(&state, query.direct_sign_in.as_deref())?;
    jar.add(app_state.security.cookies.idp_state(&state));

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, location.as_str()))
        .finish())
}

/// Always lands on `/`, whatever the upstream said.
async fn sign_out(
    user: OptionalUser,
    jar: ResponseCookies,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    jar.clear_session();
    jar.add(app_state.security.cookies.removal(IDP_STATE_COOKIE));

    if let Some(user) = &user.0 {
        if let Err(err) = app_state.auth.sign_out(&user.access_token).await {
            warn!(error = %err, "identity provider sign-out failed");
        }
        security::session_event("SIGNED_OUT", Some(&user.id.to_string()));
    }

    HttpResponse::Found().insert_header((LOCATION, "/")).finish()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sign-in", web::get().to(sign_in))
        .route("/sign-out", web::get().to(sign_out));
}

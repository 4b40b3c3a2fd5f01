//! Session endpoints: CSRF token issue, OAuth callback, sign-out.

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::cookies::{CODE_VERIFIER_COOKIE, CSRF_COOKIE, IDP_STATE_COOKIE};
use crate::auth::{csrf, AuthError, ResponseCookies};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::OptionalUser;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsrfResponse {
    csrf_token: String,
}

/// Hand out the double-submit token, reusing the cookie when one is present.
async fn issue_csrf(
    req: HttpRequest,
    jar: ResponseCookies,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = match req.cookie(CSRF_COOKIE).map(|c| c.value().to_string()) {
        Some(existing) if !existing.is_empty() => existing,
        _ => {
            let token = csrf::generate_token();
            jar.add(app_state.security.cookies.csrf(&token));
            token
        }
    };

    Ok(HttpResponse::Ok().json(CsrfResponse { csrf_token: token }))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    next: Option<String>,
    state: Option<String>,
}

/// Only same-origin relative paths are honored as post-login targets.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\") =>
        {
            path
        }
        _ => "/",
    }
}

fn exchange_error(err: AuthError) -> AppError {
    match err {
        AuthError::Rejected(_) | AuthError::BadRequest { .. } => {
            debug!(error = %err, "code exchange rejected");
            AppError::bad_request(ErrorCode::BadRequest, "Invalid or expired authorization code")
        }
        AuthError::Unavailable(_) | AuthError::Decode(_) => AppError::auth_upstream(err.to_string()),
    }
}

/// Complete the OAuth handshake and establish the session cookies.
async fn callback(
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
    jar: ResponseCookies,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::missing_field("code"))?;

    let settings = &app_state.security.cookies;

    if let Some(state) = query.state.as_deref() {
        let expected = req.cookie(IDP_STATE_COOKIE).map(|c| c.value().to_string());
        if csrf::verify(expected.as_deref(), Some(state)).is_err() {
            security::oauth_state_mismatch();
            return Err(AppError::forbidden(
                ErrorCode::InvalidOauthState,
                "OAuth state mismatch",
            ));
        }
        jar.add(settings.removal(IDP_STATE_COOKIE));
    }

    let verifier = req
        .cookie(CODE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::BadRequest, "Sign-in verifier is missing")
        })?;

    let session = app_state
        .auth
        .exchange_code(&code, &verifier)
        .await
        .map_err(exchange_error)?;

    security::session_event("SIGNED_IN", Some(&session.user.id.to_string()));
    jar.set_session(session.tokens);
    jar.add(settings.removal(CODE_VERIFIER_COOKIE));

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, safe_next(query.next.as_deref())))
        .finish())
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

/// Revoke upstream when possible; clearing local cookies always happens.
async fn sign_out(
    user: OptionalUser,
    jar: ResponseCookies,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if let Some(user) = &user.0 {
        if let Err(err) = app_state.auth.sign_out(&user.access_token).await {
            warn!(error = %err, "upstream sign-out failed; clearing local session anyway");
        }
    }
    jar.clear_session();
    security::session_event(
        "SIGNED_OUT",
        user.0.as_ref().map(|u| u.id.to_string()).as_deref(),
    );

    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

/// `/api/csrf`
pub fn configure_csrf(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(issue_csrf));
}

/// `/auth/callback`
pub fn configure_callback(cfg: &mut web::ServiceConfig) {
    cfg.route("/callback", web::get().to(callback));
}

/// `/api/auth/*`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sign-out", web::post().to(sign_out));
}

//! Session bridging between cookies and the hosted auth service.
//!
//! For every matched request:
//! 1. installs a [`ResponseCookies`] accumulator in the request extensions,
//! 2. resolves the session with at most one auth-service call,
//! 3. stores the outcome as a [`SessionContext`] for extractors,
//! 4. flushes the accumulated cookies onto the outgoing response.
//!
//! Resolution is best-effort: an upstream failure leaves the request
//! anonymous and clears nothing. Routes decide whether that is a 401.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use lazy_regex::regex_is_match;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::auth::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::auth::session::{inspect_access_token, AccessTokenState};
use crate::auth::{AuthClient, ResponseCookies, SessionContext};
use crate::logging::security;
use crate::middleware::trace_span::record_session;
use crate::state::app_state::AppState;

/// Static assets never carry meaningful session work.
pub fn is_excluded_path(path: &str) -> bool {
    path.starts_with("/_next/static/")
        || path.starts_with("/_next/image")
        || path == "/favicon.ico"
        || regex_is_match!(r"\.(svg|png|jpg|jpeg|gif|webp|ico)$", path)
}

/// Resolve the session for one request.
///
/// - no session cookies: no upstream call
/// - fresh access token: `get_user`
/// - missing, expired or unreadable access token with a refresh token:
///   `refresh_session`, whose new pair is queued on `cookies`
pub async fn resolve_session(
    auth: &dyn AuthClient,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
    cookies: &ResponseCookies,
    now: OffsetDateTime,
) -> SessionContext {
    let fresh_access = access_token
        .filter(|token| inspect_access_token(token, now) == AccessTokenState::Fresh);

    if let Some(access) = fresh_access {
        return match auth.get_user(access).await {
            Ok(user) => SessionContext {
                user: Some(user),
                access_token: Some(access.to_string()),
                refreshed: false,
            },
            Err(err) => {
                security::session_refresh_failed(&err.to_string());
                SessionContext::default()
            }
        };
    }

    let Some(refresh) = refresh_token else {
        if access_token.is_some() {
            debug!("access token expired and no refresh token present");
        }
        return SessionContext::default();
    };

    match auth.refresh_session(refresh).await {
        Ok(session) => {
            let access = session.tokens.access_token.clone();
            cookies.set_session(session.tokens);
            security::session_event("SESSION_REFRESHED", Some(&session.user.id.to_string()));
            SessionContext {
                user: Some(session.user),
                access_token: Some(access),
                refreshed: true,
            }
        }
        Err(err) => {
            security::session_refresh_failed(&err.to_string());
            SessionContext::default()
        }
    }
}

fn cookie_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub struct SessionRefresh;

impl<S, B> Transform<S, ServiceRequest> for SessionRefresh
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionRefreshMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionRefreshMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionRefreshMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionRefreshMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if is_excluded_path(req.path()) {
            return Box::pin(service.call(req));
        }

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            warn!("AppState missing; session middleware skipped");
            return Box::pin(service.call(req));
        };

        let cookies = ResponseCookies::new();
        req.extensions_mut().insert(cookies.clone());

        let access = cookie_value(&req, ACCESS_TOKEN_COOKIE);
        let refresh = cookie_value(&req, REFRESH_TOKEN_COOKIE);

        Box::pin(async move {
            let ctx = resolve_session(
                state.auth.as_ref(),
                access.as_deref(),
                refresh.as_deref(),
                &cookies,
                OffsetDateTime::now_utc(),
            )
            .await;

            if let Some(user) = &ctx.user {
                record_session(&user.id.to_string(), ctx.refreshed);
            }
            req.extensions_mut().insert(ctx);

            let mut res = service.call(req).await?;

            for cookie in cookies.take(&state.security.cookies) {
                if let Err(err) = res.response_mut().add_cookie(&cookie) {
                    warn!(cookie = cookie.name(), error = %err, "failed to attach cookie");
                }
            }

            Ok(res)
        })
    }
}

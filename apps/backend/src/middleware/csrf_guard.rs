//! Double-submit CSRF check for state-changing requests.
//!
//! POST/PUT/PATCH/DELETE must echo the `csrf_token` cookie in the
//! `x-csrf-token` header. A mismatch is answered with 403 `CSRF_MISMATCH`
//! before the handler runs, so nothing is mutated.

use std::future::{ready, Ready};

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::auth::cookies::{CSRF_COOKIE, CSRF_HEADER};
use crate::auth::csrf;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

pub struct CsrfGuard;

impl<S, B> Transform<S, ServiceRequest> for CsrfGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CsrfGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CsrfGuardMiddleware { service }))
    }
}

pub struct CsrfGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CsrfGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_state_changing(req.method()) {
            let cookie = req.cookie(CSRF_COOKIE).map(|c| c.value().to_string());
            let header = req
                .headers()
                .get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            if let Err(failure) = csrf::verify(cookie.as_deref(), header.as_deref()) {
                // Built inside the returned future so the trace id scope is active.
                return Box::pin(async move {
                    security::csrf_rejected(req.path(), failure.as_str());
                    let response =
                        AppError::forbidden(ErrorCode::CsrfMismatch, "Invalid CSRF token")
                            .error_response();
                    Ok(req.into_response(response).map_into_right_body())
                });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::SessionContext;
use crate::trace_ctx::TraceId;

/// One `request_completed` line per request, level chosen by status class.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, trace_id, user_id) = match &result {
                Ok(res) => {
                    let ext = res.request().extensions();
                    let trace_id = ext.get::<TraceId>().map(|id| id.0.clone());
                    let user_id = ext
                        .get::<SessionContext>()
                        .and_then(|ctx| ctx.user.as_ref())
                        .map(|user| user.id.to_string());
                    (res.status(), trace_id, user_id)
                }
                Err(err) => (err.as_response_error().status_code(), None, None),
            };

            log_completed(
                &method,
                &path,
                status,
                start.elapsed().as_micros() as u64,
                trace_id.as_deref().unwrap_or("unknown"),
                user_id.as_deref().unwrap_or("-"),
            );

            result
        })
    }
}

fn log_completed(
    method: &str,
    path: &str,
    status: StatusCode,
    duration_us: u64,
    trace_id: &str,
    user_id: &str,
) {
    let status_code = status.as_u16();
    if status.is_server_error() {
        error!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us, trace_id, user_id, message="request_completed");
    } else if status.is_client_error() {
        warn!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us, trace_id, user_id, message="request_completed");
    } else {
        info!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us, trace_id, user_id, message="request_completed");
    }
}

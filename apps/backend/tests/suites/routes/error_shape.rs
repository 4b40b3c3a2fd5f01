// Every AppError variant renders `{ error, code, trace_id }` with the
// trace id mirrored in the `x-trace-id` header.

use actix_web::{test, web, App, HttpResponse};
use backend::errors::ErrorCode;
use backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use backend::AppError;

use crate::common::assert_error;

async fn validation() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid(ErrorCode::ValidationError, "Field validation failed"))
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}

async fn unauthorized() -> Result<HttpResponse, AppError> {
    Err(AppError::unauthorized())
}

async fn forbidden() -> Result<HttpResponse, AppError> {
    Err(AppError::forbidden(ErrorCode::NotOwner, "Not yours"))
}

async fn internal() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("pool exhausted at 10.0.0.3"))
}

async fn db_down() -> Result<HttpResponse, AppError> {
    Err(AppError::DbUnavailable)
}

#[actix_web::test]
async fn error_bodies_follow_one_contract() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .route("/validation", web::get().to(validation))
            .route("/not-found", web::get().to(not_found))
            .route("/unauthorized", web::get().to(unauthorized))
            .route("/forbidden", web::get().to(forbidden))
            .route("/internal", web::get().to(internal))
            .route("/db-down", web::get().to(db_down)),
    )
    .await;

    let cases = [
        ("/validation", 400, "VALIDATION_ERROR"),
        ("/not-found", 404, "NOT_FOUND"),
        ("/unauthorized", 401, "UNAUTHORIZED"),
        ("/forbidden", 403, "NOT_OWNER"),
        ("/internal", 500, "INTERNAL"),
        ("/db-down", 503, "DB_UNAVAILABLE"),
    ];

    for (uri, status, code) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error(resp, status, code).await;
    }
}

#[actix_web::test]
async fn internal_detail_is_not_leaked() {
    let app = test::init_service(
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .route("/internal", web::get().to(internal)),
    )
    .await;

    let req = test::TestRequest::get().uri("/internal").to_request();
    let body = assert_error(test::call_service(&app, req).await, 500, "INTERNAL").await;

    assert_eq!(body.error, "Internal server error");
    assert!(!body.error.contains("10.0.0.3"));
}

use actix_web::test;

use crate::common::read_json;
use crate::support::{create_test_app, FakeAuth};

#[actix_web::test]
async fn health_reports_missing_dependencies_without_failing() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "unavailable");
    assert_eq!(body["cache"], "disabled");
    assert!(body["appVersion"].is_string());
    assert!(body["time"].is_string());
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header");
    assert!(!trace_id.is_empty());
}

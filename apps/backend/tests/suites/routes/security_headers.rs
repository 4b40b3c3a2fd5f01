// Hardening headers on the production route table.

use actix_web::test;

use crate::support::{create_test_app, FakeAuth};

fn header<'a, B>(resp: &'a actix_web::dev::ServiceResponse<B>, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[actix_web::test]
async fn api_responses_are_hardened_and_uncached() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/api/csrf").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(header(&resp, "x-content-type-options"), Some("nosniff"));
    assert_eq!(header(&resp, "x-frame-options"), Some("DENY"));
    assert!(header(&resp, "strict-transport-security").is_some());
    assert!(header(&resp, "content-security-policy").is_some());
    assert_eq!(header(&resp, "cache-control"), Some("no-store"));
}

#[actix_web::test]
async fn error_responses_are_hardened_too() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/api/mentions").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(header(&resp, "x-content-type-options"), Some("nosniff"));
    assert_eq!(header(&resp, "cache-control"), Some("no-store"));
}

#[actix_web::test]
async fn non_api_paths_are_not_marked_no_store() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/auth/callback").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(header(&resp, "x-frame-options"), Some("DENY"));
    assert!(header(&resp, "cache-control").is_none());
}

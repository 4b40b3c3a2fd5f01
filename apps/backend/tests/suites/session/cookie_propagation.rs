use std::sync::atomic::Ordering;

use actix_web::cookie::Cookie;
use actix_web::http::header::SET_COOKIE;
use actix_web::test;
use backend::auth::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

use crate::common::{read_json, set_cookies};
use crate::support::fake_auth::{Behavior, FakeAuth};
use crate::support::tokens::{expired_access_token, fresh_access_token};
use crate::support::create_test_app;

#[actix_web::test]
async fn no_session_cookies_means_no_upstream_call_and_no_cookies() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(auth.session_calls(), 0);
    assert!(resp.headers().get(SET_COOKIE).is_none());
}

#[actix_web::test]
async fn fresh_access_token_is_validated_without_refresh() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/health")
        .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, fresh_access_token()))
        .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "refresh-old"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(auth.get_user_calls.load(Ordering::SeqCst), 1);
    assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 0);
    assert!(set_cookies(&resp).is_empty());
}

#[actix_web::test]
async fn refresh_emits_both_cookies_together() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/health")
        .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, expired_access_token()))
        .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "refresh-old"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(auth.get_user_calls.load(Ordering::SeqCst), 0);

    let cookies = set_cookies(&resp);
    assert_eq!(
        cookies,
        vec![
            (ACCESS_TOKEN_COOKIE.to_string(), "access-refreshed".to_string()),
            (REFRESH_TOKEN_COOKIE.to_string(), "refresh-refreshed".to_string()),
        ]
    );
}

#[actix_web::test]
async fn refreshed_session_is_visible_to_the_handler() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    // sign-out needs the caller's access token; after a refresh it must be the new one
    let req = test::TestRequest::post()
        .uri("/api/auth/sign-out")
        .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "refresh-old"))
        .cookie(Cookie::new("csrf_token", "t0k"))
        .insert_header(("x-csrf-token", "t0k"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(auth.sign_out_calls.load(Ordering::SeqCst), 1);

    // The handler's clear wins over the middleware's refresh: one pair, emptied.
    let cookies = set_cookies(&resp);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|(_, value)| value.is_empty()));
    let body = read_json(resp).await;
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn expired_access_without_refresh_token_stays_anonymous() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/health")
        .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, expired_access_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(auth.session_calls(), 0);
    assert!(set_cookies(&resp).is_empty());
}

#[actix_web::test]
async fn upstream_failure_proceeds_anonymously_and_clears_nothing() {
    for behavior in [Behavior::Reject, Behavior::Unavailable] {
        let auth = FakeAuth::new(behavior);
        let app = create_test_app(auth.clone()).build().await;

        let req = test::TestRequest::get()
            .uri("/health")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, expired_access_token()))
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "refresh-old"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
        assert!(set_cookies(&resp).is_empty());
    }
}

#[actix_web::test]
async fn protected_route_is_401_when_session_does_not_resolve() {
    let auth = FakeAuth::new(Behavior::Reject);
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/mentions")
        .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, fresh_access_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    crate::common::assert_error(resp, 401, "UNAUTHORIZED").await;
    assert_eq!(auth.get_user_calls.load(Ordering::SeqCst), 1);
}

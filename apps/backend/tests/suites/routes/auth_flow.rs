use std::sync::atomic::Ordering;

use actix_web::cookie::Cookie;
use actix_web::http::header::LOCATION;
use actix_web::test;
use backend::auth::cookies::{
    ACCESS_TOKEN_COOKIE, CODE_VERIFIER_COOKIE, IDP_STATE_COOKIE, REFRESH_TOKEN_COOKIE,
};
use backend::config::IdentityProviderConfig;

use crate::common::{assert_error, set_cookies};
use crate::support::fake_auth::Behavior;
use crate::support::requests::{signed_in, with_csrf};
use crate::support::{create_test_app, FakeAuth};

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn cookie_value(cookies: &[(String, String)], name: &str) -> Option<String> {
    cookies
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
}

fn idp() -> IdentityProviderConfig {
    IdentityProviderConfig {
        endpoint: "https://id.example.com".to_string(),
        app_id: "app123".to_string(),
        redirect_uri: "https://confess.example.com/auth/callback".to_string(),
        scope: "openid profile email".to_string(),
    }
}

#[actix_web::test]
async fn callback_sets_session_cookies_and_redirects() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc&next=/feed")
        .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "verifier-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/feed");

    let cookies = set_cookies(&resp);
    assert_eq!(
        cookie_value(&cookies, ACCESS_TOKEN_COOKIE).as_deref(),
        Some("access-exchanged")
    );
    assert_eq!(
        cookie_value(&cookies, REFRESH_TOKEN_COOKIE).as_deref(),
        Some("refresh-exchanged")
    );
    assert_eq!(cookie_value(&cookies, CODE_VERIFIER_COOKIE).as_deref(), Some(""));

    assert_eq!(auth.exchange_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        auth.last_exchange.lock().unwrap().clone(),
        Some(("abc".to_string(), "verifier-1".to_string()))
    );
}

#[actix_web::test]
async fn callback_ignores_offsite_next() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc&next=https://evil.example.com")
        .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "v"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn callback_without_code_is_400() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get().uri("/auth/callback").to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_error(resp, 400, "MISSING_FIELD").await;
    assert_eq!(body.error, "code is required");
    assert_eq!(auth.exchange_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn callback_without_verifier_is_400() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 400, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn callback_state_must_match_cookie() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc&state=forged")
        .cookie(Cookie::new(IDP_STATE_COOKIE, "expected"))
        .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "v"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(set_cookies(&resp).is_empty());
    assert_error(resp, 403, "INVALID_OAUTH_STATE").await;
    assert_eq!(auth.exchange_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn rejected_code_is_400_and_upstream_outage_is_502() {
    let app = create_test_app(FakeAuth::new(Behavior::Reject)).build().await;
    let req = test::TestRequest::get()
        .uri("/auth/callback?code=stale")
        .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "v"))
        .to_request();
    assert_error(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;

    let app = create_test_app(FakeAuth::new(Behavior::Unavailable))
        .build()
        .await;
    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc")
        .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "v"))
        .to_request();
    assert_error(test::call_service(&app, req).await, 502, "AUTH_UPSTREAM").await;
}

#[actix_web::test]
async fn sign_out_revokes_upstream_and_clears_cookies() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone()).build().await;

    let req = with_csrf(signed_in(
        test::TestRequest::post().uri("/api/auth/sign-out"),
    ))
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(auth.sign_out_calls.load(Ordering::SeqCst), 1);
    let cookies = set_cookies(&resp);
    assert_eq!(cookie_value(&cookies, ACCESS_TOKEN_COOKIE).as_deref(), Some(""));
    assert_eq!(cookie_value(&cookies, REFRESH_TOKEN_COOKIE).as_deref(), Some(""));
}

#[actix_web::test]
async fn idp_sign_in_without_configuration_is_500() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/api/idp/sign-in").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 500, "CONFIG_ERROR").await;
}

#[actix_web::test]
async fn idp_sign_in_redirects_with_state_cookie() {
    let app = create_test_app(FakeAuth::succeeding())
        .with_idp(idp())
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/idp/sign-in?direct_sign_in=social:google")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    let target = reqwest::Url::parse(&location(&resp)).expect("absolute redirect");
    assert_eq!(target.host_str(), Some("id.example.com"));

    let state = cookie_value(&set_cookies(&resp), IDP_STATE_COOKIE).expect("state cookie");
    assert!(!state.is_empty());
    assert!(target.query_pairs().any(|(k, v)| k == "state" && v == state));
    assert!(target
        .query_pairs()
        .any(|(k, v)| k == "direct_sign_in" && v == "social:google"));
}

#[actix_web::test]
async fn idp_sign_out_lands_on_root() {
    let auth = FakeAuth::succeeding();
    let app = create_test_app(auth.clone())
        .with_idp(idp())
        .build()
        .await;

    let req = signed_in(test::TestRequest::get().uri("/api/idp/sign-out")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    assert_eq!(auth.sign_out_calls.load(Ordering::SeqCst), 1);
    let cookies = set_cookies(&resp);
    assert_eq!(cookie_value(&cookies, ACCESS_TOKEN_COOKIE).as_deref(), Some(""));
    assert_eq!(cookie_value(&cookies, IDP_STATE_COOKIE).as_deref(), Some(""));
}

use actix_web::cookie::Cookie;
use actix_web::{test, web, App, HttpResponse};
use backend::auth::cookies::REFRESH_TOKEN_COOKIE;
use backend::infra::state::build_state;
use backend::middleware::{RequestTrace, SessionRefresh};

use crate::support::FakeAuth;

async fn ok() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[actix_web::test]
async fn static_assets_skip_session_work() {
    let auth = FakeAuth::succeeding();
    let state = build_state().with_auth(auth.clone()).build().await.unwrap();
    let app = test::init_service(
        App::new()
            .wrap(SessionRefresh)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .default_service(web::to(ok)),
    )
    .await;

    for path in [
        "/_next/static/chunks/main.js",
        "/_next/image?url=%2Fa.png",
        "/favicon.ico",
        "/img/banner.webp",
    ] {
        let req = test::TestRequest::get()
            .uri(path)
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "r"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "{path}");
    }
    assert_eq!(auth.session_calls(), 0);

    let req = test::TestRequest::get()
        .uri("/feed")
        .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "r"))
        .to_request();
    test::call_service(&app, req).await;
    assert_eq!(auth.session_calls(), 1);
}

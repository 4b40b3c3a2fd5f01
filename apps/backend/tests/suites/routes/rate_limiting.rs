// The auth limiter is exercised with the production configuration; the
// search limiter only differs in its quota.

use std::net::SocketAddr;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{test, web, App, HttpResponse};
use backend::middleware::rate_limit::auth_rate_limit_config;
use backend::middleware::{RequestTrace, TraceSpan};

async fn ok() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn from(addr: &str) -> test::TestRequest {
    let peer: SocketAddr = addr.parse().expect("socket address");
    test::TestRequest::post()
        .uri("/api/auth/sign-out")
        .peer_addr(peer)
}

#[actix_web::test]
async fn auth_limit_is_ten_per_minute_per_ip() {
    let backend = InMemoryBackend::builder().build();
    let limiter = RateLimiter::builder(backend, auth_rate_limit_config().build())
        .add_headers()
        .build();

    let app = test::init_service(
        App::new().wrap(TraceSpan).wrap(RequestTrace).service(
            web::scope("/api/auth")
                .wrap(limiter)
                .route("/sign-out", web::post().to(ok)),
        ),
    )
    .await;

    for i in 0..10 {
        let resp = test::call_service(&app, from("10.0.0.1:5000").to_request()).await;
        assert_eq!(resp.status(), 200, "request {} is within the limit", i + 1);
        assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    }

    let resp = test::call_service(&app, from("10.0.0.1:5000").to_request()).await;
    assert_eq!(resp.status(), 429);

    // A different client has its own budget
    let resp = test::call_service(&app, from("10.0.0.2:5000").to_request()).await;
    assert_eq!(resp.status(), 200);
}

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use backend::config::{AuthServiceConfig, IdentityProviderConfig, RuntimeEnv};
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::rate_limit::{auth_rate_limit_config, search_rate_limit_config};
use backend::middleware::{
    CsrfGuard, RequestTrace, SecurityHeaders, SessionRefresh, StructuredLogger, TraceSpan,
};
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let runtime_env = RuntimeEnv::from_env();
    telemetry::init_tracing(runtime_env);

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let auth_config = match AuthServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "auth service configuration missing");
            std::process::exit(1);
        }
    };
    let idp = IdentityProviderConfig::from_env();
    if idp.is_none() {
        warn!("IDP_ENDPOINT/IDP_APP_ID/IDP_REDIRECT_URI not set; /api/idp routes disabled");
    }
    let redis_url = std::env::var("REDIS_URL").ok().filter(|u| !u.trim().is_empty());
    if redis_url.is_none() {
        warn!("REDIS_URL not set; cache disabled");
    }

    let app_state = match build_state()
        .with_security(SecurityConfig::from_env(runtime_env))
        .with_auth_config(auth_config)
        .with_db()
        .with_redis_url(redis_url)
        .with_idp(idp)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, env = ?runtime_env, "starting confessions backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);
    let shutdown_state = data.clone();

    // Counters are shared by every worker.
    let auth_backend = InMemoryBackend::builder().build();
    let search_backend = InMemoryBackend::builder().build();

    HttpServer::new(move || {
        let auth_limiter = || {
            RateLimiter::builder(auth_backend.clone(), auth_rate_limit_config().build())
                .add_headers()
                .build()
        };
        let search_limiter =
            RateLimiter::builder(search_backend.clone(), search_rate_limit_config().build())
                .add_headers()
                .build();

        App::new()
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(SessionRefresh)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure_extractors)
            .configure(routes::health::configure_routes)
            .service(web::scope("/auth").configure(routes::auth::configure_callback))
            .service(web::scope("/api/csrf").configure(routes::auth::configure_csrf))
            .service(
                web::scope("/api/auth")
                    .wrap(CsrfGuard)
                    .wrap(auth_limiter())
                    .configure(routes::auth::configure_routes),
            )
            .service(
                web::scope("/api/idp")
                    .wrap(auth_limiter())
                    .configure(routes::idp::configure_routes),
            )
            .service(
                web::scope("/api/users/search")
                    .wrap(search_limiter)
                    .configure(routes::users::configure_search),
            )
            .configure(routes::configure_api)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    if let Some(cache) = shutdown_state.cache.clone() {
        cache.disconnect().await;
    }
    info!("server stopped");
    Ok(())
}

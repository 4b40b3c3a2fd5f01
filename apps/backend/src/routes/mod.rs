use actix_web::web;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::csrf_guard::CsrfGuard;

pub mod achievements;
pub mod admin;
pub mod auth;
pub mod categories;
pub mod confessions;
pub mod hashtags;
pub mod health;
pub mod idp;
pub mod interest_groups;
pub mod mentions;
pub mod presence;
pub mod users;

/// Parse a path segment as a UUID, answering 400 `INVALID_ID` otherwise.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::invalid(ErrorCode::InvalidId, format!("Invalid {what} id")))
}

/// Query and path extraction failures use the standard error body.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid path: {err}")).into()
    }));
}

/// Configure application routes for tests and non-HttpServer contexts.
///
/// `main.rs` registers the same scopes with rate limiters in front of the
/// auth, IdP and search scopes. Every `/api` scope that accepts unsafe
/// methods carries the CSRF guard.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/auth").configure(auth::configure_callback));
    cfg.service(web::scope("/api/csrf").configure(auth::configure_csrf));
    cfg.service(
        web::scope("/api/auth")
            .wrap(CsrfGuard)
            .configure(auth::configure_routes),
    );
    cfg.service(web::scope("/api/idp").configure(idp::configure_routes));
    cfg.service(web::scope("/api/users/search").configure(users::configure_search));
    configure_api(cfg);
}

/// The unlimited `/api` scopes, shared with `main.rs`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/achievements").configure(achievements::configure_routes));
    cfg.service(web::scope("/api/categories").configure(categories::configure_routes));
    cfg.service(web::scope("/api/hashtags").configure(hashtags::configure_routes));
    cfg.service(
        web::scope("/api/confessions")
            .wrap(CsrfGuard)
            .configure(confessions::configure_routes),
    );
    cfg.service(
        web::scope("/api/interest-groups")
            .wrap(CsrfGuard)
            .configure(interest_groups::configure_routes),
    );
    cfg.service(
        web::scope("/api/mentions")
            .wrap(CsrfGuard)
            .configure(mentions::configure_routes),
    );
    cfg.service(
        web::scope("/api/update-status")
            .wrap(CsrfGuard)
            .configure(presence::configure_routes),
    );
    cfg.service(web::scope("/api/users").configure(users::configure_routes));
    cfg.service(
        web::scope("/api/admin")
            .wrap(CsrfGuard)
            .configure(admin::configure_routes),
    );
}

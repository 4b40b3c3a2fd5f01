//! `/api/admin/*`. Every handler takes an `AdminUser`, so the admin policy
//! runs before any handler body.
//!
//! Mutations write their audit row on the same transaction as the change.

use actix_web::web;

pub mod cache;
pub mod logs;
pub mod permissions;
pub mod roles;
pub mod settings;
pub mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/logs", web::get().to(logs::list))
        .route("/permissions", web::get().to(permissions::list))
        .route("/permissions", web::post().to(permissions::grant))
        .route("/settings", web::get().to(settings::list))
        .route("/settings", web::put().to(settings::upsert))
        .route("/users", web::get().to(users::list))
        .route("/users/{id}", web::patch().to(users::update))
        .route("/roles", web::get().to(roles::list))
        .route("/roles", web::post().to(roles::create))
        .route("/cache", web::get().to(cache::statistics))
        .route("/cache", web::delete().to(cache::clear));
}

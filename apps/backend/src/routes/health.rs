use actix_web::{web, HttpResponse};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    cache: &'static str,
    time: String,
}

async fn db_status(app_state: &AppState) -> &'static str {
    let Some(db) = app_state.db() else {
        return "unavailable";
    };
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    match db.query_one(ping).await {
        Ok(_) => "ok",
        Err(e) => {
            warn!(error = %e, "health check: database ping failed");
            "error"
        }
    }
}

async fn cache_status(app_state: &AppState) -> &'static str {
    match app_state.cache() {
        None => "disabled",
        Some(cache) => match cache.ping().await {
            Ok(()) => "ok",
            Err(_) => "error",
        },
    }
}

/// Liveness plus dependency pings. Always 200; dependency state is in the body.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: db_status(&app_state).await,
        cache: cache_status(&app_state).await,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

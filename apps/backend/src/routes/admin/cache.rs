use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::db;
use crate::error::AppError;
use crate::extractors::AdminUser;
use crate::services::admin_audit::{self, AuditEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct DisconnectedResponse {
    connected: bool,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    success: bool,
    removed: u64,
}

/// Without a configured cache this reports `{ connected: false }`.
pub async fn statistics(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match app_state.cache() {
        Some(cache) => Ok(HttpResponse::Ok().json(cache.statistics().await?)),
        None => Ok(HttpResponse::Ok().json(DisconnectedResponse { connected: false })),
    }
}

pub async fn clear(
    admin_user: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cache = app_state.cache().ok_or(AppError::CacheUnavailable)?;
    let removed = cache.clear().await?;

    let txn = db::begin(&app_state).await?;
    let out = admin_audit::record(
        &txn,
        admin_user.user.id,
        AuditEntry::new("cache.clear", "cache", "application")
            .with_details(json!({ "removed": removed })),
    )
    .await
    .map_err(AppError::from);
    db::finish_txn(txn, out).await?;

    Ok(HttpResponse::Ok().json(ClearResponse {
        success: true,
        removed,
    }))
}

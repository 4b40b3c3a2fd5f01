use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::db::{self, require_db};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::repos::admin::{self, Setting};
use crate::services::admin_audit::{self, AuditEntry};
use crate::state::app_state::AppState;

const MAX_KEY_LEN: usize = 100;

#[derive(Debug, Serialize)]
struct SettingsResponse {
    settings: Vec<Setting>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertSettingRequest {
    pub key: String,
    pub value: JsonValue,
}

#[derive(Debug, Serialize)]
struct UpsertResponse {
    success: bool,
    key: String,
}

pub async fn list(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let settings = admin::list_settings(require_db(&app_state)?).await?;
    Ok(HttpResponse::Ok().json(SettingsResponse { settings }))
}

pub async fn upsert(
    admin_user: AdminUser,
    body: ValidatedJson<UpsertSettingRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let UpsertSettingRequest { key, value } = body.into_inner();
    let key = key.trim().to_string();
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("key must be 1 to {MAX_KEY_LEN} characters"),
        ));
    }

    let txn = db::begin(&app_state).await?;
    let out: Result<(), AppError> = async {
        admin::upsert_setting(&txn, key.clone(), value.clone(), admin_user.user.id).await?;
        admin_audit::record(
            &txn,
            admin_user.user.id,
            AuditEntry::new("setting.update", "setting", &key)
                .with_details(json!({ "value": value })),
        )
        .await?;
        Ok(())
    }
    .await;
    db::finish_txn(txn, out).await?;

    Ok(HttpResponse::Ok().json(UpsertResponse { success: true, key }))
}

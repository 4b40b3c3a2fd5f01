use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::{self, require_db};
use crate::error::AppError;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::repos::admin::{self, Permission, RolePermission};
use crate::services::admin_audit::{self, AuditEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionsResponse {
    permissions: Vec<Permission>,
    role_permissions: Vec<RolePermission>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    pub role_id: i32,
    pub permission_id: i32,
}

#[derive(Debug, Serialize)]
struct GrantResponse {
    granted: bool,
}

pub async fn list(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let permissions = admin::list_permissions(db).await?;
    let role_permissions = admin::list_role_permissions(db).await?;
    Ok(HttpResponse::Ok().json(PermissionsResponse {
        permissions,
        role_permissions,
    }))
}

/// Idempotent: `granted` is false when the role already had the permission.
pub async fn grant(
    admin_user: AdminUser,
    body: ValidatedJson<GrantRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let grant = RolePermission {
        role_id: body.role_id,
        permission_id: body.permission_id,
    };

    let txn = db::begin(&app_state).await?;
    let out: Result<bool, AppError> = async {
        let granted = admin::grant_permission(&txn, grant).await?;
        if granted {
            admin_audit::record(
                &txn,
                admin_user.user.id,
                AuditEntry::new("permission.grant", "role", grant.role_id)
                    .with_details(json!({ "permissionId": grant.permission_id })),
            )
            .await?;
        }
        Ok(granted)
    }
    .await;
    let granted = db::finish_txn(txn, out).await?;

    Ok(HttpResponse::Ok().json(GrantResponse { granted }))
}

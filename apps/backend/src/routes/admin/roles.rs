use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::{self, require_db};
use crate::error::AppError;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::repos::admin::{self, Role};
use crate::services::admin_audit::{self, AuditEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RolesResponse {
    roles: Vec<Role>,
}

#[derive(Debug, Serialize)]
struct RoleResponse {
    role: Role,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn list(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let roles = admin::list_roles(require_db(&app_state)?).await?;
    Ok(HttpResponse::Ok().json(RolesResponse { roles }))
}

/// 201 with the new role; a taken name is 409 `UNIQUE_VIOLATION`.
pub async fn create(
    admin_user: AdminUser,
    body: ValidatedJson<CreateRoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateRoleRequest { name, description } = body.into_inner();
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::missing_field("name"));
    }
    let description = description.filter(|d| !d.trim().is_empty());

    let txn = db::begin(&app_state).await?;
    let out: Result<Role, AppError> = async {
        let role = admin::create_role(&txn, name, description).await?;
        admin_audit::record(
            &txn,
            admin_user.user.id,
            AuditEntry::new("role.create", "role", role.id),
        )
        .await?;
        Ok(role)
    }
    .await;
    let role = db::finish_txn(txn, out).await?;

    Ok(HttpResponse::Created().json(RoleResponse { role }))
}

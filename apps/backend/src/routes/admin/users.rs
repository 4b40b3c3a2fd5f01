use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::rust::double_option;

use crate::db::{self, require_db};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{AdminUser, Page, ValidatedJson};
use crate::repos::profiles::{self, AdminProfile, ProfileAdminUpdate};
use crate::routes::parse_id;
use crate::services::admin_audit::{self, AuditEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<AdminProfile>,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    user: AdminProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_banned: Option<bool>,
    // None = leave as is, Some(None) = clear the role
    #[serde(default, with = "double_option")]
    pub role: Option<Option<String>>,
}

impl UpdateUserRequest {
    fn is_empty(&self) -> bool {
        self.is_admin.is_none() && self.is_banned.is_none() && self.role.is_none()
    }
}

pub async fn list(
    _admin: AdminUser,
    page: Page,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = profiles::list_for_admin(require_db(&app_state)?, page.limit, page.offset).await?;
    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

pub async fn update(
    admin_user: AdminUser,
    path: web::Path<String>,
    body: ValidatedJson<UpdateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_id(&path, "user")?;
    let body = body.into_inner();
    if body.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "At least one of isAdmin, isBanned or role is required",
        ));
    }

    let details = json!({
        "isAdmin": body.is_admin,
        "isBanned": body.is_banned,
        "role": body.role,
    });
    let update = ProfileAdminUpdate {
        is_admin: body.is_admin,
        is_banned: body.is_banned,
        role: body.role.map(|role| role.map(|r| r.trim().to_string())),
    };

    let txn = db::begin(&app_state).await?;
    let out: Result<AdminProfile, AppError> = async {
        let user = profiles::update_admin_fields(&txn, user_id, update).await?;
        admin_audit::record(
            &txn,
            admin_user.user.id,
            AuditEntry::new("user.update", "user", user_id).with_details(details),
        )
        .await?;
        Ok(user)
    }
    .await;
    let user = db::finish_txn(txn, out).await?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

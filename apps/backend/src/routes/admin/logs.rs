use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{AdminUser, Page};
use crate::repos::admin::{self, AdminLog};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct LogsResponse {
    logs: Vec<AdminLog>,
}

pub async fn list(
    _admin: AdminUser,
    page: Page,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let logs = admin::list_logs(require_db(&app_state)?, page.limit, page.offset).await?;
    Ok(HttpResponse::Ok().json(LogsResponse { logs }))
}

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::profiles::{self, PresenceStatus};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
struct UpdateStatusResponse {
    success: bool,
    status: PresenceStatus,
}

async fn update_status(
    current_user: CurrentUser,
    body: ValidatedJson<UpdateStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let status = PresenceStatus::parse(body.status.trim()).ok_or_else(|| {
        AppError::invalid(
            ErrorCode::InvalidStatus,
            "Status must be one of: online, away, offline",
        )
    })?;

    profiles::set_status(require_db(&app_state)?, current_user.id, status).await?;

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        success: true,
        status,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(update_status));
}

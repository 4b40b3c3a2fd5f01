use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::confessions::Confession;
use crate::services::confessions as confession_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditConfessionRequest {
    pub id: Uuid,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ConfessionResponse {
    confession: Confession,
}

async fn edit(
    current_user: CurrentUser,
    body: ValidatedJson<EditConfessionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let db = require_db(&app_state)?;

    let confession =
        confession_service::edit(db, current_user.id, body.id, &body.content).await?;

    Ok(HttpResponse::Ok().json(ConfessionResponse { confession }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/edit", web::post().to(edit));
}

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, Page, ValidatedJson};
use crate::repos::mentions::{self, Mention};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct MentionsQuery {
    #[serde(default)]
    unread: bool,
}

#[derive(Debug, Serialize)]
struct MentionsResponse {
    mentions: Vec<Mention>,
}

/// `ids` absent marks every unread mention of the caller.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    #[serde(default)]
    pub ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
struct MarkReadResponse {
    updated: u64,
}

async fn list(
    current_user: CurrentUser,
    query: web::Query<MentionsQuery>,
    page: Page,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mentions = mentions::list_for_user(
        require_db(&app_state)?,
        current_user.id,
        query.unread,
        page.limit,
        page.offset,
    )
    .await?;
    Ok(HttpResponse::Ok().json(MentionsResponse { mentions }))
}

async fn mark_read(
    current_user: CurrentUser,
    body: ValidatedJson<MarkReadRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ids = body.into_inner().ids;
    let updated =
        mentions::mark_read(require_db(&app_state)?, current_user.id, ids.as_deref()).await?;
    Ok(HttpResponse::Ok().json(MarkReadResponse { updated }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("/read", web::post().to(mark_read));
}

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::parse_id;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, Page};
use crate::repos::groups::{self, GroupMember, InterestGroup};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct GroupsResponse {
    groups: Vec<InterestGroup>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinResponse {
    success: bool,
    group_id: Uuid,
}

#[derive(Debug, Serialize)]
struct LeaveResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
struct MembersResponse {
    members: Vec<GroupMember>,
}

async fn list(page: Page, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let groups = groups::list(require_db(&app_state)?, page.limit, page.offset).await?;
    Ok(HttpResponse::Ok().json(GroupsResponse { groups }))
}

async fn join(
    path: web::Path<String>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let group_id = parse_id(&path, "group")?;
    let db = require_db(&app_state)?;

    groups::require_group(db, group_id).await?;
    let added = groups::join(db, group_id, current_user.id).await?;
    info!(group_id = %group_id, user_id = %current_user.id, added, "group join");

    Ok(HttpResponse::Created().json(JoinResponse {
        success: true,
        group_id,
    }))
}

async fn leave(
    path: web::Path<String>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let group_id = parse_id(&path, "group")?;
    groups::leave(require_db(&app_state)?, group_id, current_user.id).await?;
    Ok(HttpResponse::Ok().json(LeaveResponse { success: true }))
}

async fn members(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let group_id = parse_id(&path, "group")?;
    let db = require_db(&app_state)?;

    groups::require_group(db, group_id).await?;
    let members = groups::members(db, group_id).await?;
    Ok(HttpResponse::Ok().json(MembersResponse { members }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("/{id}/join", web::post().to(join))
        .route("/{id}/leave", web::post().to(leave))
        .route("/{id}/members", web::get().to(members));
}

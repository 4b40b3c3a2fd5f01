use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::parse_id;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::profiles::{self, PublicProfile};
use crate::repos::progress::{self, UnlockedAchievement, UserLevel};
use crate::services::user_stats::{self, UserStats};
use crate::state::app_state::AppState;

const DEFAULT_SEARCH_LIMIT: u64 = 10;
const MAX_SEARCH_LIMIT: u64 = 50;

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    limit: Option<u64>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    users: Vec<PublicProfile>,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    stats: UserStats,
}

#[derive(Debug, Serialize)]
struct AchievementsResponse {
    achievements: Vec<UnlockedAchievement>,
}

#[derive(Debug, Serialize)]
struct LevelResponse {
    level: UserLevel,
}

/// Query failures degrade to an empty result; a missing `q` is still a 400.
async fn search(
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::missing_field("q"))?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let users = match require_db(&app_state) {
        Ok(db) => profiles::search(db, q, limit).await.map_err(AppError::from),
        Err(err) => Err(err),
    };
    let users = users.unwrap_or_else(|err| {
        warn!(error = %err, "user search failed; returning empty list");
        Vec::new()
    });

    Ok(HttpResponse::Ok().json(SearchResponse { users }))
}

async fn stats(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_id(&path, "user")?;
    let stats = user_stats::load(require_db(&app_state)?, user_id).await?;
    Ok(HttpResponse::Ok().json(StatsResponse { stats }))
}

async fn achievements(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_id(&path, "user")?;
    let achievements = progress::unlocked_achievements(require_db(&app_state)?, user_id).await?;
    Ok(HttpResponse::Ok().json(AchievementsResponse { achievements }))
}

async fn level(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_id(&path, "user")?;
    let level = progress::level(require_db(&app_state)?, user_id).await?;
    Ok(HttpResponse::Ok().json(LevelResponse { level }))
}

/// `/api/users/search`, registered on its own so it can be rate limited.
pub fn configure_search(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(search));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{user_id}/stats", web::get().to(stats))
        .route("/{user_id}/achievements", web::get().to(achievements))
        .route("/{user_id}/level", web::get().to(level));
}

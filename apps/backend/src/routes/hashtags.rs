use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::Page;
use crate::repos::catalog::{self, Hashtag};
use crate::repos::confessions::{self, Confession};
use crate::state::app_state::AppState;

const DEFAULT_TRENDING: u64 = 10;
const MAX_TRENDING: u64 = 50;

#[derive(Debug, Deserialize)]
struct TrendingQuery {
    limit: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TrendingResponse {
    hashtags: Vec<Hashtag>,
}

#[derive(Debug, Serialize)]
struct TaggedResponse {
    tag: String,
    confessions: Vec<Confession>,
}

async fn trending(
    query: web::Query<TrendingQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_TRENDING)
        .clamp(1, MAX_TRENDING);
    let hashtags = catalog::trending_hashtags(require_db(&app_state)?, limit).await?;
    Ok(HttpResponse::Ok().json(TrendingResponse { hashtags }))
}

/// Confessions for one tag. An unknown tag is an empty list, not a 404.
async fn tagged(
    path: web::Path<String>,
    page: Page,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let tag = catalog::normalize_tag(&path.into_inner());
    if tag.is_empty() {
        return Err(AppError::invalid(ErrorCode::ValidationError, "Tag is required"));
    }

    let db = require_db(&app_state)?;
    let confessions = match catalog::find_hashtag(db, &tag).await? {
        Some(hashtag) => {
            confessions::list_by_hashtag(db, hashtag.id, page.limit, page.offset).await?
        }
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(TaggedResponse { tag, confessions }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/trending", web::get().to(trending))
        .route("/{tag}", web::get().to(tagged));
}

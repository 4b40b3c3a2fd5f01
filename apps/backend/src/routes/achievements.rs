use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::repos::catalog::Achievement;
use crate::services::catalog;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct AchievementsResponse {
    achievements: Vec<Achievement>,
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let achievements = catalog::achievements(&app_state).await?;
    Ok(HttpResponse::Ok().json(AchievementsResponse { achievements }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list));
}

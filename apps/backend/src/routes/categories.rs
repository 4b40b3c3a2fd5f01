use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::warn;

use crate::repos::catalog::Category;
use crate::services::catalog;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

/// Never fails: a broken query renders as an empty list.
async fn list(app_state: web::Data<AppState>) -> HttpResponse {
    let categories = match catalog::categories(&app_state).await {
        Ok(categories) => categories,
        Err(err) => {
            warn!(error = %err, "category query failed; returning empty list");
            Vec::new()
        }
    };
    HttpResponse::Ok().json(CategoriesResponse { categories })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list));
}

//! Cache-aside reads for the rarely-changing catalog tables.
//!
//! The cache is optional. A cache miss, a cache error, or no cache at all
//! all fall through to the database; cache failures are logged, never
//! returned.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::db::require_db;
use crate::error::AppError;
use crate::repos::catalog::{self, Achievement, Category};
use crate::state::app_state::AppState;

pub const CATEGORIES_KEY: &str = "categories:all";
pub const ACHIEVEMENTS_KEY: &str = "achievements:all";
pub const CATALOG_TTL_SECS: u64 = 300;

async fn cached<T>(state: &AppState, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let cache = state.cache()?;
    match cache.get_json::<T>(key).await {
        Ok(hit) => {
            debug!(key, hit = hit.is_some(), "catalog cache lookup");
            hit
        }
        Err(_) => None,
    }
}

async fn store<T: Serialize>(state: &AppState, key: &str, value: &T) {
    if let Some(cache) = state.cache() {
        // Failures are already logged by the cache client.
        let _ = cache.set_json(key, value, CATALOG_TTL_SECS).await;
    }
}

pub async fn categories(state: &AppState) -> Result<Vec<Category>, AppError> {
    if let Some(hit) = cached::<Vec<Category>>(state, CATEGORIES_KEY).await {
        return Ok(hit);
    }
    let rows = catalog::list_categories(require_db(state)?).await?;
    store(state, CATEGORIES_KEY, &rows).await;
    Ok(rows)
}

pub async fn achievements(state: &AppState) -> Result<Vec<Achievement>, AppError> {
    if let Some(hit) = cached::<Vec<Achievement>>(state, ACHIEVEMENTS_KEY).await {
        return Ok(hit);
    }
    let rows = catalog::list_achievements(require_db(state)?).await?;
    store(state, ACHIEVEMENTS_KEY, &rows).await;
    Ok(rows)
}

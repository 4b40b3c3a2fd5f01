//! Catalog repository: categories, achievement definitions, hashtags.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::adapters::catalog_sea as adapter;
use crate::entities::{achievements, categories, hashtags};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

impl From<categories::Model> for Category {
    fn from(m: categories::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            sort_order: m.sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub points: i32,
}

impl From<achievements::Model> for Achievement {
    fn from(m: achievements::Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            description: m.description,
            icon: m.icon,
            points: m.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hashtag {
    pub id: i32,
    pub tag: String,
    pub usage_count: i32,
}

impl From<hashtags::Model> for Hashtag {
    fn from(m: hashtags::Model) -> Self {
        Self {
            id: m.id,
            tag: m.tag,
            usage_count: m.usage_count,
        }
    }
}

/// Canonical stored form of a tag: trimmed, without leading `#`, lowercase.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_lowercase()
}

pub async fn list_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Category>, DomainError> {
    let rows = adapter::list_categories(conn).await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

pub async fn list_achievements<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Achievement>, DomainError> {
    let rows = adapter::list_achievements(conn).await?;
    Ok(rows.into_iter().map(Achievement::from).collect())
}

pub async fn trending_hashtags<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Hashtag>, DomainError> {
    let rows = adapter::trending_hashtags(conn, limit).await?;
    Ok(rows.into_iter().map(Hashtag::from).collect())
}

pub async fn find_hashtag<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tag: &str,
) -> Result<Option<Hashtag>, DomainError> {
    Ok(adapter::find_hashtag(conn, tag).await?.map(Hashtag::from))
}

//! Confession repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::confessions_sea as adapter;
use crate::entities::confessions;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confession {
    pub id: Uuid,
    /// Hidden for anonymous confessions
    pub user_id: Option<Uuid>,
    pub content: String,
    pub category_id: Option<i32>,
    pub is_anonymous: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub edited_at: Option<OffsetDateTime>,
}

impl From<confessions::Model> for Confession {
    fn from(m: confessions::Model) -> Self {
        Self {
            id: m.id,
            user_id: (!m.is_anonymous).then_some(m.user_id),
            content: m.content,
            category_id: m.category_id,
            is_anonymous: m.is_anonymous,
            created_at: m.created_at,
            updated_at: m.updated_at,
            edited_at: m.edited_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<confessions::Model>, DomainError> {
    Ok(adapter::find_by_id(conn, id).await?)
}

pub async fn update_content<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: confessions::Model,
    content: String,
) -> Result<Confession, DomainError> {
    let updated =
        adapter::update_content(conn, existing, content, OffsetDateTime::now_utc()).await?;
    Ok(updated.into())
}

pub async fn list_by_hashtag<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hashtag_id: i32,
    limit: u64,
    offset: u64,
) -> Result<Vec<Confession>, DomainError> {
    let rows = adapter::list_by_hashtag(conn, hashtag_id, limit, offset).await?;
    Ok(rows.into_iter().map(Confession::from).collect())
}

pub async fn count_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(adapter::count_by_user(conn, user_id).await?)
}

//! Mention repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::mentions_sea as adapter;
use crate::entities::{confessions, mentions};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: Uuid,
    pub confession_id: Uuid,
    /// Hidden when the mentioning confession is anonymous
    pub mentioned_by: Option<Uuid>,
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<(mentions::Model, Option<confessions::Model>)> for Mention {
    fn from((m, confession): (mentions::Model, Option<confessions::Model>)) -> Self {
        let anonymous = confession.is_some_and(|c| c.is_anonymous);
        Self {
            id: m.id,
            confession_id: m.confession_id,
            mentioned_by: (!anonymous).then_some(m.mentioned_by),
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    unread_only: bool,
    limit: u64,
    offset: u64,
) -> Result<Vec<Mention>, DomainError> {
    let rows = adapter::list_for_user(conn, user_id, unread_only, limit, offset).await?;
    Ok(rows.into_iter().map(Mention::from).collect())
}

pub async fn mark_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    ids: Option<&[Uuid]>,
) -> Result<u64, DomainError> {
    if ids.is_some_and(|ids| ids.is_empty()) {
        return Ok(0);
    }
    Ok(adapter::mark_read(conn, user_id, ids).await?)
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(adapter::count_for_user(conn, user_id).await?)
}

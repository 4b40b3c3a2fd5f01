//! Aggregate counters shown on a user's profile.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::repos::{confessions, groups, mentions, progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub confessions: u64,
    pub achievements: u64,
    pub groups: u64,
    pub mentions: u64,
}

pub async fn load<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<UserStats, DomainError> {
    Ok(UserStats {
        confessions: confessions::count_by_user(conn, user_id).await?,
        achievements: progress::count_unlocked(conn, user_id).await?,
        groups: groups::count_memberships(conn, user_id).await?,
        mentions: mentions::count_for_user(conn, user_id).await?,
    })
}

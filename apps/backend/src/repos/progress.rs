//! Per-user achievements and levels, read as stored rows.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::catalog::Achievement;
use crate::adapters::progress_sea as adapter;
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    #[serde(with = "time::serde::rfc3339")]
    pub unlocked_at: OffsetDateTime,
    pub achievement: Achievement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLevel {
    pub user_id: Uuid,
    pub level: i32,
    pub experience: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn unlocked_achievements<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<UnlockedAchievement>, DomainError> {
    let rows = adapter::unlocked_achievements(conn, user_id).await?;
    rows.into_iter()
        .map(|(unlocked, definition)| {
            let definition = definition.ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "user_achievements row references missing achievement {}",
                        unlocked.achievement_id
                    ),
                )
            })?;
            Ok(UnlockedAchievement {
                unlocked_at: unlocked.unlocked_at,
                achievement: definition.into(),
            })
        })
        .collect()
}

pub async fn count_unlocked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(adapter::count_unlocked(conn, user_id).await?)
}

/// The user's level row. A missing row is a query failure, not a 404:
/// every profile is created with a level row.
pub async fn level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<UserLevel, DomainError> {
    let row = adapter::find_level(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::query("No level record found for user"))?;
    Ok(UserLevel {
        user_id: row.user_id,
        level: row.level,
        experience: row.experience,
        updated_at: row.updated_at,
    })
}

//! Profile repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::profiles_sea as adapter;
pub use crate::adapters::profiles_sea::ProfileAdminUpdate;
use crate::entities::profiles;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    Offline,
}

impl PresenceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "online" => Some(Self::Online),
            "away" => Some(Self::Away),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }
}

/// What other users may see about a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_seen: Option<OffsetDateTime>,
}

impl From<profiles::Model> for PublicProfile {
    fn from(m: profiles::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            display_name: m.display_name,
            avatar_url: m.avatar_url,
            bio: m.bio,
            status: m.status,
            last_seen: m.last_seen,
        }
    }
}

/// Full profile row as shown to admins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub is_banned: bool,
    pub role: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<profiles::Model> for AdminProfile {
    fn from(m: profiles::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            display_name: m.display_name,
            email: m.email,
            is_admin: m.is_admin,
            is_banned: m.is_banned,
            role: m.role,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

/// `profiles.is_admin` for `user_id`, or `None` when the user has no profile row.
pub async fn admin_flag<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<bool>, DomainError> {
    let profile = adapter::find_by_id(conn, user_id).await?;
    Ok(profile.map(|p| p.is_admin))
}

/// Escape LIKE wildcards and wrap in `%...%`, lowercased.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &str,
    limit: u64,
) -> Result<Vec<PublicProfile>, DomainError> {
    let rows = adapter::search(conn, &like_pattern(query), limit).await?;
    Ok(rows.into_iter().map(PublicProfile::from).collect())
}

pub async fn list_for_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<Vec<AdminProfile>, DomainError> {
    let rows = adapter::list(conn, limit, offset).await?;
    Ok(rows.into_iter().map(AdminProfile::from).collect())
}

pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    status: PresenceStatus,
) -> Result<(), DomainError> {
    let rows =
        adapter::update_status(conn, user_id, status.as_str(), OffsetDateTime::now_utc()).await?;
    match rows {
        0 => Err(DomainError::not_found(
            NotFoundKind::User,
            "Profile not found",
        )),
        1 => Ok(()),
        n => Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("status update touched {n} profiles for one id"),
        )),
    }
}

pub async fn update_admin_fields<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    update: ProfileAdminUpdate,
) -> Result<AdminProfile, DomainError> {
    adapter::update_admin_fields(conn, user_id, update)
        .await?
        .map(AdminProfile::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
}

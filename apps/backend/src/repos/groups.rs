//! Interest group repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::profiles::PublicProfile;
use crate::adapters::groups_sea as adapter;
use crate::entities::interest_groups;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestGroup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<interest_groups::Model> for InterestGroup {
    fn from(m: interest_groups::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    pub profile: Option<PublicProfile>,
    pub user_id: Uuid,
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<Vec<InterestGroup>, DomainError> {
    let rows = adapter::list_groups(conn, limit, offset).await?;
    Ok(rows.into_iter().map(InterestGroup::from).collect())
}

pub async fn require_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<InterestGroup, DomainError> {
    adapter::find_group(conn, id)
        .await?
        .map(InterestGroup::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Group, "Group not found"))
}

/// Idempotent; returns true when the caller was not a member before.
pub async fn join<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DomainError> {
    Ok(adapter::add_member(conn, group_id, user_id, OffsetDateTime::now_utc()).await?)
}

pub async fn leave<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DomainError> {
    Ok(adapter::remove_member(conn, group_id, user_id).await? > 0)
}

pub async fn members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: Uuid,
) -> Result<Vec<GroupMember>, DomainError> {
    let rows = adapter::list_members(conn, group_id).await?;
    Ok(rows
        .into_iter()
        .map(|(member, profile)| GroupMember {
            joined_at: member.joined_at,
            profile: profile.map(PublicProfile::from),
            user_id: member.user_id,
        })
        .collect())
}

pub async fn count_memberships<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(adapter::count_memberships(conn, user_id).await?)
}

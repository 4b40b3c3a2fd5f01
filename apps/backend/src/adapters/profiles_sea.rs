//! SeaORM adapter for profiles.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::profiles;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Admin-editable profile fields; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileAdminUpdate {
    pub is_admin: Option<bool>,
    pub is_banned: Option<bool>,
    /// `Some(None)` clears the role
    pub role: Option<Option<String>>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<profiles::Model>, sea_orm::DbErr> {
    profiles::Entity::find_by_id(id).one(conn).await
}

/// Case-insensitive substring match on username or display name.
pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pattern: &str,
    limit: u64,
) -> Result<Vec<profiles::Model>, sea_orm::DbErr> {
    profiles::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(profiles::Column::Username)))
                .like(pattern)
                .or(Expr::expr(Func::lower(Expr::col(profiles::Column::DisplayName))).like(pattern)),
        )
        .filter(profiles::Column::IsBanned.eq(false))
        .order_by_asc(profiles::Column::Username)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<Vec<profiles::Model>, sea_orm::DbErr> {
    profiles::Entity::find()
        .order_by_desc(profiles::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

/// Returns the number of rows touched (0 when the profile does not exist).
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    status: &str,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = profiles::Entity::update_many()
        .col_expr(profiles::Column::Status, Expr::value(status))
        .col_expr(profiles::Column::LastSeen, Expr::value(Some(now)))
        .filter(profiles::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_admin_fields<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    dto: ProfileAdminUpdate,
) -> Result<Option<profiles::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let mut active: profiles::ActiveModel = existing.into();
    if let Some(is_admin) = dto.is_admin {
        active.is_admin = Set(is_admin);
    }
    if let Some(is_banned) = dto.is_banned {
        active.is_banned = Set(is_banned);
    }
    if let Some(role) = dto.role {
        active.role = Set(role);
    }

    profiles::Entity::update(active).exec(conn).await.map(Some)
}

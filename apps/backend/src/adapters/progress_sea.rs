//! SeaORM adapter for per-user progress rows: unlocked achievements and levels.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{achievements, user_achievements, user_levels};

pub async fn unlocked_achievements<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<(user_achievements::Model, Option<achievements::Model>)>, sea_orm::DbErr> {
    user_achievements::Entity::find()
        .filter(user_achievements::Column::UserId.eq(user_id))
        .order_by_desc(user_achievements::Column::UnlockedAt)
        .find_also_related(achievements::Entity)
        .all(conn)
        .await
}

pub async fn count_unlocked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    user_achievements::Entity::find()
        .filter(user_achievements::Column::UserId.eq(user_id))
        .count(conn)
        .await
}

pub async fn find_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<user_levels::Model>, sea_orm::DbErr> {
    user_levels::Entity::find_by_id(user_id).one(conn).await
}

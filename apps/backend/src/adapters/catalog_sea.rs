//! SeaORM adapter for the read-mostly catalog tables:
//! categories, achievement definitions and hashtags.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{achievements, categories, hashtags};

pub async fn list_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<categories::Model>, sea_orm::DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::SortOrder)
        .order_by_asc(categories::Column::Name)
        .all(conn)
        .await
}

pub async fn list_achievements<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<achievements::Model>, sea_orm::DbErr> {
    achievements::Entity::find()
        .order_by_asc(achievements::Column::Id)
        .all(conn)
        .await
}

pub async fn trending_hashtags<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<hashtags::Model>, sea_orm::DbErr> {
    hashtags::Entity::find()
        .filter(hashtags::Column::UsageCount.gt(0))
        .order_by_desc(hashtags::Column::UsageCount)
        .order_by_asc(hashtags::Column::Tag)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_hashtag<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tag: &str,
) -> Result<Option<hashtags::Model>, sea_orm::DbErr> {
    hashtags::Entity::find()
        .filter(hashtags::Column::Tag.eq(tag))
        .one(conn)
        .await
}

//! SeaORM adapter for confessions.

use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{confession_hashtags, confessions};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<confessions::Model>, sea_orm::DbErr> {
    confessions::Entity::find_by_id(id).one(conn).await
}

/// Replace the content and stamp `updated_at`/`edited_at`.
pub async fn update_content<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: confessions::Model,
    content: String,
    now: OffsetDateTime,
) -> Result<confessions::Model, sea_orm::DbErr> {
    let mut active: confessions::ActiveModel = existing.into();
    active.content = Set(content);
    active.updated_at = Set(now);
    active.edited_at = Set(Some(now));
    active.update(conn).await
}

/// Newest-first confessions tagged with `hashtag_id`.
pub async fn list_by_hashtag<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hashtag_id: i32,
    limit: u64,
    offset: u64,
) -> Result<Vec<confessions::Model>, sea_orm::DbErr> {
    let tagged = Query::select()
        .column(confession_hashtags::Column::ConfessionId)
        .from(confession_hashtags::Entity)
        .and_where(confession_hashtags::Column::HashtagId.eq(hashtag_id))
        .to_owned();

    confessions::Entity::find()
        .filter(confessions::Column::Id.in_subquery(tagged))
        .order_by_desc(confessions::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

pub async fn count_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    confessions::Entity::find()
        .filter(confessions::Column::UserId.eq(user_id))
        .count(conn)
        .await
}

//! SeaORM adapter for mentions.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::{confessions, mentions};

/// Mentions of `user_id`, newest first, each with the confession it came from.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    unread_only: bool,
    limit: u64,
    offset: u64,
) -> Result<Vec<(mentions::Model, Option<confessions::Model>)>, sea_orm::DbErr> {
    let mut query = mentions::Entity::find()
        .find_also_related(confessions::Entity)
        .filter(mentions::Column::MentionedUserId.eq(user_id));
    if unread_only {
        query = query.filter(mentions::Column::IsRead.eq(false));
    }
    query
        .order_by_desc(mentions::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

/// Mark the caller's mentions read; all of them when `ids` is `None`.
pub async fn mark_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    ids: Option<&[Uuid]>,
) -> Result<u64, sea_orm::DbErr> {
    let mut update = mentions::Entity::update_many()
        .col_expr(mentions::Column::IsRead, Expr::value(true))
        .filter(mentions::Column::MentionedUserId.eq(user_id))
        .filter(mentions::Column::IsRead.eq(false));
    if let Some(ids) = ids {
        update = update.filter(mentions::Column::Id.is_in(ids.iter().copied()));
    }
    Ok(update.exec(conn).await?.rows_affected)
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    mentions::Entity::find()
        .filter(mentions::Column::MentionedUserId.eq(user_id))
        .count(conn)
        .await
}

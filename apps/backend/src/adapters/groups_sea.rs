//! SeaORM adapter for interest groups and their memberships.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{interest_group_members, interest_groups, profiles};

pub async fn list_groups<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<Vec<interest_groups::Model>, sea_orm::DbErr> {
    interest_groups::Entity::find()
        .filter(interest_groups::Column::IsPrivate.eq(false))
        .order_by_asc(interest_groups::Column::Name)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

pub async fn find_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<interest_groups::Model>, sea_orm::DbErr> {
    interest_groups::Entity::find_by_id(id).one(conn).await
}

/// Insert the membership unless it already exists. Returns true when a row was added.
pub async fn add_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: Uuid,
    user_id: Uuid,
    now: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let member = interest_group_members::ActiveModel {
        group_id: Set(group_id),
        user_id: Set(user_id),
        joined_at: Set(now),
    };

    let rows = interest_group_members::Entity::insert(member)
        .on_conflict(
            OnConflict::columns([
                interest_group_members::Column::GroupId,
                interest_group_members::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(rows == 1)
}

pub async fn remove_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = interest_group_members::Entity::delete_many()
        .filter(interest_group_members::Column::GroupId.eq(group_id))
        .filter(interest_group_members::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn list_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: Uuid,
) -> Result<Vec<(interest_group_members::Model, Option<profiles::Model>)>, sea_orm::DbErr> {
    interest_group_members::Entity::find()
        .filter(interest_group_members::Column::GroupId.eq(group_id))
        .order_by_asc(interest_group_members::Column::JoinedAt)
        .find_also_related(profiles::Entity)
        .all(conn)
        .await
}

pub async fn count_memberships<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    interest_group_members::Entity::find()
        .filter(interest_group_members::Column::UserId.eq(user_id))
        .count(conn)
        .await
}

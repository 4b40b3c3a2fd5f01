//! SeaORM adapter for the admin tables: audit log, roles, permissions, settings.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, QuerySelect, Set,
};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{admin_logs, app_settings, permissions, role_permissions, roles};

/// DTO for one audit log entry.
#[derive(Debug, Clone)]
pub struct AdminLogCreate {
    pub admin_id: Uuid,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub details: Option<JsonValue>,
}

pub async fn insert_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AdminLogCreate,
    now: OffsetDateTime,
) -> Result<(), sea_orm::DbErr> {
    let log = admin_logs::ActiveModel {
        id: NotSet,
        admin_id: Set(dto.admin_id),
        action: Set(dto.action),
        target_type: Set(dto.target_type),
        target_id: Set(dto.target_id),
        details: Set(dto.details),
        created_at: Set(now),
    };
    admin_logs::Entity::insert(log)
        .exec_without_returning(conn)
        .await
        .map(|_| ())
}

pub async fn list_logs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<Vec<admin_logs::Model>, sea_orm::DbErr> {
    admin_logs::Entity::find()
        .order_by_desc(admin_logs::Column::CreatedAt)
        .order_by_desc(admin_logs::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

pub async fn list_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<roles::Model>, sea_orm::DbErr> {
    roles::Entity::find()
        .order_by_asc(roles::Column::Name)
        .all(conn)
        .await
}

pub async fn create_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    description: Option<String>,
) -> Result<roles::Model, sea_orm::DbErr> {
    roles::ActiveModel {
        id: NotSet,
        name: Set(name),
        description: Set(description),
    }
    .insert(conn)
    .await
}

pub async fn list_permissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<permissions::Model>, sea_orm::DbErr> {
    permissions::Entity::find()
        .order_by_asc(permissions::Column::Name)
        .all(conn)
        .await
}

pub async fn list_role_permissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<role_permissions::Model>, sea_orm::DbErr> {
    role_permissions::Entity::find()
        .order_by_asc(role_permissions::Column::RoleId)
        .order_by_asc(role_permissions::Column::PermissionId)
        .all(conn)
        .await
}

/// Returns true when the grant was new.
pub async fn grant_permission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i32,
    permission_id: i32,
) -> Result<bool, sea_orm::DbErr> {
    let grant = role_permissions::ActiveModel {
        role_id: Set(role_id),
        permission_id: Set(permission_id),
    };
    let rows = role_permissions::Entity::insert(grant)
        .on_conflict(
            OnConflict::columns([
                role_permissions::Column::RoleId,
                role_permissions::Column::PermissionId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(rows == 1)
}

pub async fn list_settings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<app_settings::Model>, sea_orm::DbErr> {
    app_settings::Entity::find()
        .order_by_asc(app_settings::Column::Key)
        .all(conn)
        .await
}

pub async fn upsert_setting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    key: String,
    value: JsonValue,
    updated_by: Uuid,
    now: OffsetDateTime,
) -> Result<(), sea_orm::DbErr> {
    let setting = app_settings::ActiveModel {
        key: Set(key),
        value: Set(value),
        updated_at: Set(now),
        updated_by: Set(Some(updated_by)),
    };
    app_settings::Entity::insert(setting)
        .on_conflict(
            OnConflict::column(app_settings::Column::Key)
                .update_columns([
                    app_settings::Column::Value,
                    app_settings::Column::UpdatedAt,
                    app_settings::Column::UpdatedBy,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map(|_| ())
}

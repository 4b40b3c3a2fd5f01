//! Admin repository: audit log, roles, permissions and settings.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::admin_sea as adapter;
pub use crate::adapters::admin_sea::AdminLogCreate;
use crate::entities::{admin_logs, app_settings, permissions, role_permissions, roles};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLog {
    pub id: i64,
    pub admin_id: Uuid,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub details: Option<JsonValue>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<admin_logs::Model> for AdminLog {
    fn from(m: admin_logs::Model) -> Self {
        Self {
            id: m.id,
            admin_id: m.admin_id,
            action: m.action,
            target_type: m.target_type,
            target_id: m.target_id,
            details: m.details,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<roles::Model> for Role {
    fn from(m: roles::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<permissions::Model> for Permission {
    fn from(m: permissions::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub role_id: i32,
    pub permission_id: i32,
}

impl From<role_permissions::Model> for RolePermission {
    fn from(m: role_permissions::Model) -> Self {
        Self {
            role_id: m.role_id,
            permission_id: m.permission_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: JsonValue,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub updated_by: Option<Uuid>,
}

impl From<app_settings::Model> for Setting {
    fn from(m: app_settings::Model) -> Self {
        Self {
            key: m.key,
            value: m.value,
            updated_at: m.updated_at,
            updated_by: m.updated_by,
        }
    }
}

pub async fn record_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry: AdminLogCreate,
) -> Result<(), DomainError> {
    Ok(adapter::insert_log(conn, entry, OffsetDateTime::now_utc()).await?)
}

pub async fn list_logs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<Vec<AdminLog>, DomainError> {
    let rows = adapter::list_logs(conn, limit, offset).await?;
    Ok(rows.into_iter().map(AdminLog::from).collect())
}

pub async fn list_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Role>, DomainError> {
    let rows = adapter::list_roles(conn).await?;
    Ok(rows.into_iter().map(Role::from).collect())
}

pub async fn create_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    description: Option<String>,
) -> Result<Role, DomainError> {
    Ok(adapter::create_role(conn, name, description).await?.into())
}

pub async fn list_permissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Permission>, DomainError> {
    let rows = adapter::list_permissions(conn).await?;
    Ok(rows.into_iter().map(Permission::from).collect())
}

pub async fn list_role_permissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<RolePermission>, DomainError> {
    let rows = adapter::list_role_permissions(conn).await?;
    Ok(rows.into_iter().map(RolePermission::from).collect())
}

pub async fn grant_permission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    grant: RolePermission,
) -> Result<bool, DomainError> {
    Ok(adapter::grant_permission(conn, grant.role_id, grant.permission_id).await?)
}

pub async fn list_settings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Setting>, DomainError> {
    let rows = adapter::list_settings(conn).await?;
    Ok(rows.into_iter().map(Setting::from).collect())
}

pub async fn upsert_setting<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    key: String,
    value: JsonValue,
    updated_by: Uuid,
) -> Result<(), DomainError> {
    Ok(adapter::upsert_setting(conn, key, value, updated_by, OffsetDateTime::now_utc()).await?)
}

//! Audit trail for admin mutations.

use sea_orm::ConnectionTrait;
use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::repos::admin::{self, AdminLogCreate};

/// What an admin did, to what.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub action: &'static str,
    pub target_type: &'static str,
    pub target_id: String,
    pub details: Option<JsonValue>,
}

impl AuditEntry {
    pub fn new(action: &'static str, target_type: &'static str, target_id: impl ToString) -> Self {
        Self {
            action,
            target_type,
            target_id: target_id.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }
}

/// Write one `admin_logs` row. Callers run this on the same transaction as
/// the mutation so both land or neither does.
pub async fn record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    admin_id: Uuid,
    entry: AuditEntry,
) -> Result<(), DomainError> {
    info!(
        admin_id = %admin_id,
        action = entry.action,
        target_type = entry.target_type,
        target_id = %entry.target_id,
        "admin action"
    );
    admin::record_log(
        conn,
        AdminLogCreate {
            admin_id,
            action: entry.action.to_string(),
            target_type: Some(entry.target_type.to_string()),
            target_id: Some(entry.target_id),
            details: entry.details,
        },
    )
    .await
}

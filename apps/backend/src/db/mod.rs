use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// Returns `AppError::DbUnavailable` when no database is configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or(AppError::DbUnavailable)
}

/// Finish a transaction opened by the caller: commit on `Ok`, rollback on `Err`.
pub async fn finish_txn<T>(
    txn: DatabaseTransaction,
    out: Result<T, AppError>,
) -> Result<T, AppError> {
    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

/// Open a transaction on the configured database.
pub async fn begin(state: &AppState) -> Result<DatabaseTransaction, AppError> {
    Ok(require_db(state)?.begin().await?)
}

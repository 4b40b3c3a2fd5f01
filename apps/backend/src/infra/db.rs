use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, sanitize_db_url};
use crate::error::AppError;

const MAX_CONNECTIONS: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

/// Connect to the hosted Postgres database. The schema is owned by the
/// database host; no migrations run from here.
pub async fn connect_db() -> Result<DatabaseConnection, AppError> {
    let url = db_url()?;
    connect_url(&url).await
}

pub async fn connect_url(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(MAX_CONNECTIONS)
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    info!(url = %sanitize_db_url(url), "database connected");
    Ok(conn)
}

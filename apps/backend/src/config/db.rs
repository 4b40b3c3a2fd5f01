use std::env;

use super::env::{must_var, opt_var};
use crate::error::AppError;

/// Builds the Postgres URL for the hosted database.
///
/// `DATABASE_URL` wins when set. Otherwise the URL is composed from
/// `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`, `POSTGRES_USER` and
/// `POSTGRES_PASSWORD`.
pub fn db_url() -> Result<String, AppError> {
    if let Some(url) = opt_var("DATABASE_URL") {
        return Ok(url);
    }

    let host = host();
    let port = port();
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Mask the password of a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth.rfind(':') {
        Some(colon) if auth[..colon].contains("//") => {
            format!("{}:***@{}", &auth[..colon], host)
        }
        _ => url.to_string(),
    }
}

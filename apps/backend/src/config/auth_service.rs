use std::time::Duration;

use super::env::must_var;
use crate::error::AppError;

/// Connection settings for the hosted auth API.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Project URL, e.g. `https://xyz.supabase.co` (no trailing slash)
    pub url: String,
    /// Anonymous (public) API key sent as `apikey`
    pub anon_key: String,
    pub timeout: Duration,
}

impl AuthServiceConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self, AppError> {
        let url = must_var("SUPABASE_URL")?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppError::config(format!(
                "SUPABASE_URL must be an http(s) URL, got '{url}'"
            )));
        }
        Ok(Self::new(url, must_var("SUPABASE_ANON_KEY")?))
    }

    /// Absolute URL of an auth endpoint, e.g. `endpoint("user")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }
}

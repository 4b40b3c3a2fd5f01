use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::AuthClient;
use crate::config::IdentityProviderConfig;
use crate::infra::cache::CacheClient;

/// Shared resources handed to every handler and middleware.
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<Arc<DatabaseConnection>>,
    /// Hosted auth service
    pub auth: Arc<dyn AuthClient>,
    /// Redis cache; absent when `REDIS_URL` is unset
    pub cache: Option<CacheClient>,
    pub security: SecurityConfig,
    /// External OAuth provider; absent when not configured
    pub idp: Option<IdentityProviderConfig>,
}

impl AppState {
    pub fn new(auth: Arc<dyn AuthClient>, security: SecurityConfig) -> Self {
        Self {
            db: None,
            auth,
            cache: None,
            security,
            idp: None,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }

    pub fn cache(&self) -> Option<&CacheClient> {
        self.cache.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("cache", &self.cache.is_some())
            .field("security", &self.security)
            .field("idp", &self.idp)
            .finish_non_exhaustive()
    }
}

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::{AuthClient, HttpAuthClient};
use crate::config::{AuthServiceConfig, IdentityProviderConfig};
use crate::error::AppError;
use crate::infra::cache::{CacheClient, DEFAULT_KEY_PREFIX};
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum DbSource {
    None,
    Connect,
    Existing(Arc<DatabaseConnection>),
}

/// Builder for `AppState` (used in both tests and main).
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: DbSource,
    auth: Option<Arc<dyn AuthClient>>,
    auth_config: Option<AuthServiceConfig>,
    redis_url: Option<String>,
    cache: Option<CacheClient>,
    idp: Option<IdentityProviderConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db: DbSource::None,
            auth: None,
            auth_config: None,
            redis_url: None,
            cache: None,
            idp: None,
        }
    }

    /// Connect to the database from the environment at build time.
    pub fn with_db(mut self) -> Self {
        self.db = DbSource::Connect;
        self
    }

    /// Use an already-open connection (mock databases in tests).
    pub fn with_existing_db(mut self, conn: Arc<DatabaseConnection>) -> Self {
        self.db = DbSource::Existing(conn);
        self
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthClient>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build an `HttpAuthClient` from this config at build time.
    pub fn with_auth_config(mut self, config: AuthServiceConfig) -> Self {
        self.auth_config = Some(config);
        self
    }

    /// Connect a cache at build time. `None` leaves the cache disabled.
    pub fn with_redis_url(mut self, url: Option<String>) -> Self {
        self.redis_url = url;
        self
    }

    pub fn with_cache(mut self, cache: CacheClient) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_idp(mut self, idp: Option<IdentityProviderConfig>) -> Self {
        self.idp = idp;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let auth: Arc<dyn AuthClient> = match (self.auth, self.auth_config) {
            (Some(auth), _) => auth,
            (None, Some(config)) => Arc::new(HttpAuthClient::new(config)?),
            (None, None) => {
                return Err(AppError::config(
                    "an auth client or auth service config is required",
                ))
            }
        };

        let mut state = AppState::new(auth, self.security_config);
        state.idp = self.idp;

        state.db = match self.db {
            DbSource::None => None,
            DbSource::Connect => Some(Arc::new(connect_db().await?)),
            DbSource::Existing(conn) => Some(conn),
        };

        state.cache = match (self.cache, self.redis_url) {
            (Some(cache), _) => Some(cache),
            (None, Some(url)) => Some(CacheClient::connect(&url, DEFAULT_KEY_PREFIX).await?),
            (None, None) => None,
        };

        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

//! Redis-backed application cache.
//!
//! Constructed once at startup and handed to handlers through `AppState`;
//! `main` calls [`CacheClient::disconnect`] on shutdown. All keys live under
//! a prefix so clearing never touches foreign data in a shared Redis.

use redis::aio::ConnectionManager;
use redis::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppError;

pub const DEFAULT_KEY_PREFIX: &str = "confessions:";
const SCAN_BATCH: u32 = 200;

#[derive(Clone)]
pub struct CacheClient {
    manager: ConnectionManager,
    prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatistics {
    pub connected: bool,
    pub total_keys: u64,
    pub app_keys: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub used_memory: Option<String>,
}

fn redis_err(context: &str, err: redis::RedisError) -> AppError {
    warn!(error = %err, "{context}");
    AppError::CacheUnavailable
}

impl CacheClient {
    pub async fn connect(redis_url: &str, prefix: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|err| redis_err("unable to initialize Redis connection manager", err))?;

        info!("cache connected");
        Ok(Self {
            manager,
            prefix: prefix.into(),
        })
    }

    /// Release the connection. Called once when the server stops.
    pub async fn disconnect(self) {
        drop(self.manager);
        info!("cache disconnected");
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| redis_err("cache ping failed", e))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_err("cache get failed", e))?;

        match raw {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    warn!(key, error = %err, "discarding undecodable cache entry");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), AppError> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("cache encode failed: {e}")))?;
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(self.key(key))
            .arg(encoded)
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| redis_err("cache set failed", e))
    }

    async fn prefixed_keys(&self) -> Result<Vec<String>, AppError> {
        let mut conn = self.manager.clone();
        let pattern = format!("{}*", self.prefix);
        let mut cursor = 0u64;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| redis_err("cache scan failed", e))?;
            keys.extend(batch);
            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }

    pub async fn statistics(&self) -> Result<CacheStatistics, AppError> {
        let mut conn = self.manager.clone();
        let total_keys: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_err("cache dbsize failed", e))?;
        let stats: String = redis::cmd("INFO")
            .arg("stats")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_err("cache info failed", e))?;
        let memory: String = redis::cmd("INFO")
            .arg("memory")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_err("cache info failed", e))?;
        let app_keys = self.prefixed_keys().await?.len() as u64;

        Ok(build_statistics(total_keys, app_keys, &stats, &memory))
    }

    /// Delete every key under the prefix; returns how many were removed.
    pub async fn clear(&self) -> Result<u64, AppError> {
        let keys = self.prefixed_keys().await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.manager.clone();
        let mut removed = 0u64;
        for chunk in keys.chunks(SCAN_BATCH as usize) {
            let n: u64 = redis::cmd("DEL")
                .arg(chunk)
                .query_async(&mut conn)
                .await
                .map_err(|e| redis_err("cache clear failed", e))?;
            removed += n;
        }
        info!(removed, "cache cleared");
        Ok(removed)
    }
}

/// Value of `field:value` in a Redis INFO section.
fn info_field<'a>(info: &'a str, field: &str) -> Option<&'a str> {
    info.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        (name == field).then(|| value.trim())
    })
}

fn build_statistics(total_keys: u64, app_keys: u64, stats: &str, memory: &str) -> CacheStatistics {
    let hits = info_field(stats, "keyspace_hits")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let misses = info_field(stats, "keyspace_misses")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let lookups = hits + misses;
    let hit_rate = if lookups == 0 {
        0.0
    } else {
        hits as f64 / lookups as f64
    };

    CacheStatistics {
        connected: true,
        total_keys,
        app_keys,
        hits,
        misses,
        hit_rate,
        used_memory: info_field(memory, "used_memory_human").map(str::to_string),
    }
}

//! Key-value cache client for the navigation payload.
//!
//! The cache speaks a two-operation protocol: `get(key)` returns a JSON
//! string or nothing, `set(key, value)` acknowledges a write. Both can fail;
//! callers must treat any failure or absent value as a miss.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(#[from] redis::RedisError),
}

/// Cache backend for [`crate::nav::load_nav_data`].
///
/// `Redis` is the production mode. `Memory` keeps entries in-process and is
/// what tests and single-node setups use. `Disabled` always misses on reads
/// and drops writes, so the loader reconstructs on every request.
#[derive(Clone)]
pub enum NavCache {
    Redis(ConnectionManager),
    Memory(Arc<Mutex<HashMap<String, String>>>),
    Disabled,
}

impl NavCache {
    /// Connect to a Redis instance. Retries are bounded so an unreachable
    /// cache fails fast instead of stalling request handling.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(100));

        let client = Client::open(url)?;
        let manager = client.get_connection_manager_with_config(config).await?;

        Ok(Self::Redis(manager))
    }

    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    pub fn disabled() -> Self {
        Self::Disabled
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Self::Redis(manager) => {
                let mut conn = manager.clone();
                Ok(conn.get(key).await?)
            }
            Self::Memory(map) => Ok(map.lock().expect("cache lock poisoned").get(key).cloned()),
            Self::Disabled => Ok(None),
        }
    }

    pub async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        match self {
            Self::Redis(manager) => {
                let mut conn = manager.clone();
                conn.set::<_, _, ()>(key, value).await?;
                Ok(())
            }
            Self::Memory(map) => {
                map.lock()
                    .expect("cache lock poisoned")
                    .insert(key.to_string(), value);
                Ok(())
            }
            Self::Disabled => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_cache_round_trips() {
        let cache = NavCache::memory();
        assert_eq!(cache.get("navData").await.unwrap(), None);

        cache.set("navData", "{}".to_string()).await.unwrap();
        assert_eq!(cache.get("navData").await.unwrap(), Some("{}".to_string()));
    }

    #[tokio::test]
    async fn disabled_cache_always_misses() {
        let cache = NavCache::disabled();
        cache.set("navData", "{}".to_string()).await.unwrap();
        assert_eq!(cache.get("navData").await.unwrap(), None);
    }
}

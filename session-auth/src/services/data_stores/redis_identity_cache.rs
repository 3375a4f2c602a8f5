use std::sync::Arc;

use log::warn;

use super::{RedisService, RedisServiceErr};
use crate::domain::{CacheError, IdentityCache};

pub struct RedisIdentityCache {
    redis: Arc<RedisService>,
}

impl RedisIdentityCache {
    pub fn new(redis: Arc<RedisService>) -> Self {
        Self { redis }
    }
}

fn unavailable(e: RedisServiceErr) -> CacheError {
    warn!("redis identity cache error: {e}");
    CacheError::Unavailable(e.to_string())
}

#[async_trait::async_trait]
impl IdentityCache for RedisIdentityCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.redis.get(key).await.map_err(unavailable)
    }

    async fn set(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), CacheError> {
        // SET EX rejects 0; a zero TTL means the entry is already gone
        if ttl_seconds == 0 {
            return self.delete(key).await;
        }
        self.redis
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(unavailable)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.redis.delete_key(key).await.map(|_| ()).map_err(unavailable)
    }
}

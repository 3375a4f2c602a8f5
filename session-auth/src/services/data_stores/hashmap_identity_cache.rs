use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::domain::{CacheError, IdentityCache};

// Expired entries are dropped lazily; a full sweep runs once the map grows past this.
const SWEEP_THRESHOLD: usize = 1024;

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

#[derive(Default)]
pub struct HashmapIdentityCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl HashmapIdentityCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl IdentityCache for HashmapIdentityCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().await;
        Ok(match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            _ => None,
        })
    }

    async fn set(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        if ttl_seconds == 0 {
            entries.remove(key);
            return Ok(());
        }

        let now = Instant::now();
        if entries.len() >= SWEEP_THRESHOLD {
            entries.retain(|_, entry| entry.expires_at > now);
        }
        entries.insert(
            key.to_owned(),
            CacheEntry {
                value: value.to_vec(),
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

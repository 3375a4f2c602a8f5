use super::CacheError;

/// Ephemeral TTL key/value cache.
///
/// An entry must never be observable once its TTL has elapsed; it may vanish
/// earlier. A miss means "unknown", not "absent". `set` with a zero TTL
/// stores nothing and removes any existing entry under the key.
#[async_trait::async_trait]
pub trait IdentityCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    async fn set(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

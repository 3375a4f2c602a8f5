use redis::{aio::MultiplexedConnection, Client};
use redis::{AsyncCommands, SetExpiry, SetOptions};
use std::error::Error;
use std::fmt;

fn crud<E: ToString>(e: E) -> RedisServiceErr {
    RedisServiceErr::CRUDErr(e.to_string())
}

#[derive(Debug)]
pub enum RedisServiceErr {
    ConnectionErr(String),
    CRUDErr(String),
}

impl fmt::Display for RedisServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedisServiceErr::ConnectionErr(str) => {
                write!(f, "error while connecting to instance: {str}")
            }
            RedisServiceErr::CRUDErr(str) => write!(f, "error while performing CRUD action: {str}"),
        }
    }
}

impl Error for RedisServiceErr {}

/// Thin wrapper over a redis client. Each call checks out a multiplexed
/// connection; a dead instance surfaces as `ConnectionErr` on every call.
pub struct RedisService {
    client: Client,
}

impl RedisService {
    pub fn new(host: &str) -> Result<Self, RedisServiceErr> {
        let client = Client::open(format!("redis://{}/", host))
            .map_err(|e| RedisServiceErr::ConnectionErr(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, RedisServiceErr> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| RedisServiceErr::ConnectionErr(e.to_string()))
    }

    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &[u8],
        ttl_seconds: u64,
    ) -> Result<(), RedisServiceErr> {
        // EX 0 is rejected by redis
        let ttl = ttl_seconds.max(1);
        let mut conn = self.get_connection().await?;
        let opts = SetOptions::default().with_expiration(SetExpiry::EX(ttl));
        conn.set_options::<_, _, ()>(key, value, opts)
            .await
            .map_err(crud)
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        conn.get(key).await.map_err(crud)
    }

    pub async fn delete_key(&self, key: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        let deleted: i32 = conn.del(key).await.map_err(crud)?;
        Ok(deleted > 0)
    }
}

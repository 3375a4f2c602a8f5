mod hashmap_identity_cache;
mod hashmap_session_ledger;
mod redis_identity_cache;
mod redis_service;
mod sql_session_ledger;
mod user_locks;

pub use hashmap_identity_cache::*;
pub use hashmap_session_ledger::*;
pub use redis_identity_cache::*;
pub use redis_service::*;
pub use sql_session_ledger::*;
pub use user_locks::*;

pub mod cache_err;
pub mod identity_cache;
pub mod jwt_key_store;
pub mod ledger_err;
pub mod refresh_record;
pub mod session_ledger;
pub mod user_store;
pub mod user_store_err;

pub use cache_err::*;
pub use identity_cache::*;
pub use jwt_key_store::*;
pub use ledger_err::*;
pub use refresh_record::*;
pub use session_ledger::*;
pub use user_store::UserStore;
pub use user_store_err::UserStoreError;

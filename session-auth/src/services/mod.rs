pub mod argon2_verifier;
pub mod auth;
pub mod data_stores;
pub mod hashmap_user_store;
pub mod ledger_sweeper;
pub mod mock_email_client;
pub mod token_service;

pub use argon2_verifier::*;
pub use auth::*;
pub use data_stores::*;
pub use hashmap_user_store::*;
pub use ledger_sweeper::*;
pub use mock_email_client::*;
pub use token_service::*;

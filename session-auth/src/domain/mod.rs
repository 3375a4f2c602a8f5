pub mod claims;
pub mod credential_verifier;
pub mod data_stores;
pub mod email;
pub mod email_client;
pub mod email_request;
pub mod issued_tokens;
pub mod login_request;
pub mod message_response;
pub mod models;
pub mod password;
pub mod reset_password_request;
pub mod signup_request;
pub mod user_response;
mod user;

pub use claims::*;
pub use credential_verifier::*;
pub use data_stores::*;
pub use email::*;
pub use email_client::*;
pub use email_request::*;
pub use issued_tokens::*;
pub use login_request::*;
pub use message_response::*;
pub use models::*;
pub use password::*;
pub use reset_password_request::*;
pub use signup_request::*;
pub use user::*;
pub use user_response::*;

mod current_user;
pub mod http;

pub use current_user::*;
pub use http::*;

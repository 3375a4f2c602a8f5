mod auth;
mod email_flow;
mod login;
mod signup;

pub use auth::*;
pub use email_flow::*;
pub use login::*;
pub use signup::*;

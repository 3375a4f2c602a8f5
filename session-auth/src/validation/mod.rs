pub mod email;
pub mod password;
pub mod username;

pub use email::*;
pub use password::*;
pub use username::*;

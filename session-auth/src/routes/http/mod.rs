pub(crate) mod email;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod password;
pub(crate) mod refresh;
pub(crate) mod signup;

// re-export items from sub-modules
pub use email::*;
pub use login::*;
pub use logout::*;
pub use me::*;
pub use password::*;
pub use refresh::*;
pub use signup::*;

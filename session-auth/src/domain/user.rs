use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;

pub type UserId = i64;

/// Account as owned by the user store. Cached verbatim under `user:<email>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account; the password is already hashed.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: String, email: Email, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
        }
    }
}

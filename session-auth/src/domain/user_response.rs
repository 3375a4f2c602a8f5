use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{User, UserId};

/// Public view of a user; never exposes the password hash.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.as_ref().to_owned(),
            is_confirmed: user.is_confirmed,
            created_at: user.created_at,
        }
    }
}

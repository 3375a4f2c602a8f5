use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// One live device session as held by the ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at >= now
    }
}

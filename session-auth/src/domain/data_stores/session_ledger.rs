use chrono::{DateTime, Utc};

use super::{LedgerError, RefreshTokenRecord};
use crate::domain::UserId;

/// Which rows `delete_refresh_token` removes.
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshSelector {
    Token(String),
    Session { user_id: UserId, session_id: String },
}

impl RefreshSelector {
    /// Build a selector from loose optional parts, as a routing layer would
    /// receive them. Exactly one complete shape must be present.
    pub fn from_parts(
        token: Option<String>,
        user_id: Option<UserId>,
        session_id: Option<String>,
    ) -> Result<Self, LedgerError> {
        match (token, user_id, session_id) {
            (Some(token), None, None) => Ok(Self::Token(token)),
            (None, Some(user_id), Some(session_id)) => Ok(Self::Session {
                user_id,
                session_id,
            }),
            _ => Err(LedgerError::InvalidRequestShape),
        }
    }
}

/// Durable record of outstanding refresh tokens.
///
/// Implementations must make `add_refresh_token` atomic per `user_id`: the
/// purge, count and insert run as one unit against concurrent calls for the
/// same user, otherwise concurrent logins can overshoot the cap.
#[async_trait::async_trait]
pub trait SessionLedger: Send + Sync {
    /// Purges the user's expired records, then inserts unless `cap` live
    /// records already exist. Returns `false` (and inserts nothing) at the cap.
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
        cap: usize,
    ) -> Result<bool, LedgerError>;

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, LedgerError>;

    /// Removes matching rows and re-runs the expiry purge for the affected
    /// user. Returns how many rows the selector matched.
    async fn delete_refresh_token(&self, selector: RefreshSelector) -> Result<u64, LedgerError>;

    /// Replaces `old_token` with `record` as one unit under the same per-user
    /// atomicity as `add_refresh_token`. Returns `false` and changes nothing
    /// when `old_token` is not in the ledger. The swap is one-for-one, so no
    /// cap check applies.
    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        record: RefreshTokenRecord,
    ) -> Result<bool, LedgerError>;

    /// Deletes records with `expires_at < now`; scoped to one user when
    /// `user_id` is given, system-wide otherwise.
    async fn remove_expired_refresh_tokens(
        &self,
        user_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<u64, LedgerError>;

    async fn count_active_sessions(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, LedgerError>;
}

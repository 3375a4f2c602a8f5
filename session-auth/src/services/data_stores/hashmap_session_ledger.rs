use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{
    LedgerError, RefreshSelector, RefreshTokenRecord, SessionLedger, UserId,
};

/// Process-local ledger keyed by refresh token. A single write lock covers
/// purge, count and insert, so admission is atomic for every user at once.
#[derive(Default)]
pub struct HashmapSessionLedger {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl HashmapSessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

fn purge_expired(
    records: &mut HashMap<String, RefreshTokenRecord>,
    user_id: Option<UserId>,
    now: DateTime<Utc>,
) -> u64 {
    let before = records.len();
    records.retain(|_, record| {
        let in_scope = user_id.map_or(true, |id| record.user_id == id);
        !(in_scope && record.expires_at < now)
    });
    (before - records.len()) as u64
}

#[async_trait::async_trait]
impl SessionLedger for HashmapSessionLedger {
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
        cap: usize,
    ) -> Result<bool, LedgerError> {
        let mut records = self.records.write().await;
        let now = Utc::now();
        purge_expired(&mut records, Some(record.user_id), now);

        let live = records
            .values()
            .filter(|r| r.user_id == record.user_id && r.is_live_at(now))
            .count();
        if live >= cap {
            return Ok(false);
        }
        if records.contains_key(&record.token) {
            return Err(LedgerError::DuplicateToken);
        }

        records.insert(record.token.clone(), record);
        Ok(true)
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, LedgerError> {
        Ok(self.records.read().await.get(token).cloned())
    }

    async fn delete_refresh_token(&self, selector: RefreshSelector) -> Result<u64, LedgerError> {
        let mut records = self.records.write().await;
        let (removed, user_id) = match selector {
            RefreshSelector::Token(token) => match records.remove(&token) {
                Some(record) => (1, Some(record.user_id)),
                None => (0, None),
            },
            RefreshSelector::Session {
                user_id,
                session_id,
            } => {
                let before = records.len();
                records.retain(|_, r| !(r.user_id == user_id && r.session_id == session_id));
                ((before - records.len()) as u64, Some(user_id))
            }
        };

        if let Some(user_id) = user_id {
            purge_expired(&mut records, Some(user_id), Utc::now());
        }
        Ok(removed)
    }

    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        record: RefreshTokenRecord,
    ) -> Result<bool, LedgerError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.token) {
            return Err(LedgerError::DuplicateToken);
        }
        if records.remove(old_token).is_none() {
            return Ok(false);
        }

        purge_expired(&mut records, Some(record.user_id), Utc::now());
        records.insert(record.token.clone(), record);
        Ok(true)
    }

    async fn remove_expired_refresh_tokens(
        &self,
        user_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<u64, LedgerError> {
        let mut records = self.records.write().await;
        Ok(purge_expired(&mut records, user_id, now))
    }

    async fn count_active_sessions(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, LedgerError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && r.is_live_at(now))
            .count())
    }
}

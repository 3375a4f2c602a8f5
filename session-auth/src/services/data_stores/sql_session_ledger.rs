use chrono::{DateTime, Utc};
use log::{debug, error};
use welds::connections::any::AnyClient;
use welds::{Client, TransactStart};

use super::UserLocks;
use crate::domain::{
    LedgerError, RefreshSelector, RefreshTokenModel, RefreshTokenRecord, SessionLedger, UserId,
};

const DELETE_BY_TOKEN: &str = "DELETE FROM refresh_tokens WHERE token = $1";
const DELETE_BY_SESSION: &str = "DELETE FROM refresh_tokens WHERE user_id = $1 AND session_id = $2";
const PURGE_USER: &str = "DELETE FROM refresh_tokens WHERE user_id = $1 AND expires_at < $2";
const PURGE_ALL: &str = "DELETE FROM refresh_tokens WHERE expires_at < $1";

fn unavailable<E: std::fmt::Display>(e: E) -> LedgerError {
    error!("session ledger store error: {e}");
    LedgerError::Unavailable(e.to_string())
}

/// Ledger backed by the `refresh_tokens` table.
///
/// Admission runs inside a transaction while holding the user's lock from
/// [`UserLocks`], so two logins for one user never both see `cap - 1` rows.
/// The lock is process-local: several replicas sharing one database can
/// still overshoot the cap by one per replica.
pub struct SqlSessionLedger {
    client: AnyClient,
    locks: UserLocks,
}

impl SqlSessionLedger {
    pub fn new(client: AnyClient) -> Self {
        Self {
            client,
            locks: UserLocks::new(),
        }
    }

    async fn purge<C: Client>(
        client: &C,
        user_id: Option<UserId>,
        now: i64,
    ) -> Result<u64, LedgerError> {
        let result = match user_id {
            Some(user_id) => client.execute(PURGE_USER, &[&user_id, &now]).await,
            None => client.execute(PURGE_ALL, &[&now]).await,
        }
        .map_err(unavailable)?;
        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl SessionLedger for SqlSessionLedger {
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
        cap: usize,
    ) -> Result<bool, LedgerError> {
        let _guard = self.locks.acquire(record.user_id).await;
        let now = Utc::now().timestamp();

        let trans = self.client.begin().await.map_err(unavailable)?;
        let purged = Self::purge(&trans, Some(record.user_id), now).await?;
        if purged > 0 {
            debug!("purged {purged} expired refresh tokens for user {}", record.user_id);
        }

        let live = RefreshTokenModel::where_col(|r| r.user_id.equal(record.user_id))
            .where_col(|r| r.expires_at.gte(now))
            .count(&trans)
            .await
            .map_err(unavailable)?;
        if live as usize >= cap {
            // dropping the transaction rolls the purge back; the next call redoes it
            return Ok(false);
        }

        let existing = RefreshTokenModel::where_col(|r| r.token.equal(record.token.as_str()))
            .count(&trans)
            .await
            .map_err(unavailable)?;
        if existing > 0 {
            return Err(LedgerError::DuplicateToken);
        }

        let mut row = RefreshTokenModel::new();
        row.token = record.token;
        row.user_id = record.user_id;
        row.session_id = record.session_id;
        row.expires_at = record.expires_at.timestamp();
        row.save(&trans).await.map_err(unavailable)?;

        trans.commit().await.map_err(unavailable)?;
        Ok(true)
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, LedgerError> {
        let rows = RefreshTokenModel::where_col(|r| r.token.equal(token))
            .limit(1)
            .run(&self.client)
            .await
            .map_err(unavailable)?;
        Ok(rows.first().map(|row| RefreshTokenRecord::from(&**row)))
    }

    async fn delete_refresh_token(&self, selector: RefreshSelector) -> Result<u64, LedgerError> {
        let now = Utc::now().timestamp();
        match selector {
            RefreshSelector::Token(token) => {
                let owner = self.get_refresh_token(&token).await?.map(|r| r.user_id);
                let removed = self
                    .client
                    .execute(DELETE_BY_TOKEN, &[&token])
                    .await
                    .map_err(unavailable)?
                    .rows_affected();
                if let Some(user_id) = owner {
                    Self::purge(&self.client, Some(user_id), now).await?;
                }
                Ok(removed)
            }
            RefreshSelector::Session {
                user_id,
                session_id,
            } => {
                let removed = self
                    .client
                    .execute(DELETE_BY_SESSION, &[&user_id, &session_id])
                    .await
                    .map_err(unavailable)?
                    .rows_affected();
                Self::purge(&self.client, Some(user_id), now).await?;
                Ok(removed)
            }
        }
    }

    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        record: RefreshTokenRecord,
    ) -> Result<bool, LedgerError> {
        let _guard = self.locks.acquire(record.user_id).await;
        let now = Utc::now().timestamp();

        let old_token = old_token.to_owned();
        let trans = self.client.begin().await.map_err(unavailable)?;
        let removed = trans
            .execute(DELETE_BY_TOKEN, &[&old_token])
            .await
            .map_err(unavailable)?
            .rows_affected();
        if removed == 0 {
            return Ok(false);
        }
        Self::purge(&trans, Some(record.user_id), now).await?;

        let existing = RefreshTokenModel::where_col(|r| r.token.equal(record.token.as_str()))
            .count(&trans)
            .await
            .map_err(unavailable)?;
        if existing > 0 {
            return Err(LedgerError::DuplicateToken);
        }

        let mut row = RefreshTokenModel::new();
        row.token = record.token;
        row.user_id = record.user_id;
        row.session_id = record.session_id;
        row.expires_at = record.expires_at.timestamp();
        row.save(&trans).await.map_err(unavailable)?;

        trans.commit().await.map_err(unavailable)?;
        Ok(true)
    }

    async fn remove_expired_refresh_tokens(
        &self,
        user_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<u64, LedgerError> {
        Self::purge(&self.client, user_id, now.timestamp()).await
    }

    async fn count_active_sessions(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, LedgerError> {
        let count = RefreshTokenModel::where_col(|r| r.user_id.equal(user_id))
            .where_col(|r| r.expires_at.gte(now.timestamp()))
            .count(&self.client)
            .await
            .map_err(unavailable)?;
        Ok(count as usize)
    }
}

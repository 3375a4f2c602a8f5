use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::UserId;

// Idle entries are pruned once the map grows past this.
const PRUNE_THRESHOLD: usize = 4096;

/// One async mutex per user id. Serialises check-then-insert against stores
/// that cannot lock a user's rows themselves.
#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            if locks.len() > PRUNE_THRESHOLD {
                // a held or awaited lock has a clone outstanding
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks.entry(user_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

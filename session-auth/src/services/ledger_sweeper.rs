use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::SessionLedger;

/// Periodically drop expired refresh tokens for every user. The inline purge
/// in the ledger only touches users who log in or out, so idle users' rows
/// would otherwise linger until their next visit.
pub fn spawn_ledger_sweeper(ledger: Arc<dyn SessionLedger>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("ledger sweeper running every {}s", every.as_secs());
        loop {
            interval.tick().await;
            match ledger.remove_expired_refresh_tokens(None, Utc::now()).await {
                Ok(0) => debug!("ledger sweep found nothing to remove"),
                Ok(n) => info!("ledger sweep removed {n} expired refresh tokens"),
                Err(e) => error!("ledger sweep failed: {e}"),
            }
        }
    })
}

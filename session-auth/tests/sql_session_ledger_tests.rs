#![cfg(feature = "sql-tests")]

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use session_auth::domain::{RefreshSelector, RefreshTokenRecord, SessionLedger, UserId};
use session_auth::services::SqlSessionLedger;
use session_auth::utils::consts::env::DATABASE_URL_ENV_VAR;
use session_auth::{get_db_pool, migrations};

/// Runs against `DATABASE_URL` when set, otherwise a fresh sqlite file.
///
/// Run:
///   cargo test --features sql-tests --test sql_session_ledger_tests
async fn build_ledger() -> SqlSessionLedger {
    let url = std::env::var(DATABASE_URL_ENV_VAR).unwrap_or_else(|_| {
        let path = std::env::temp_dir().join(format!("ledger-{}.db", Uuid::new_v4()));
        format!("sqlite://{}?mode=rwc", path.display())
    });
    let client = get_db_pool(&url).await.expect("failed to connect");
    migrations::up(&client).await.expect("migrations failed");
    SqlSessionLedger::new(client)
}

// Random ids keep runs against a shared database apart.
fn unique_user() -> UserId {
    (Uuid::new_v4().as_u128() % 1_000_000_000) as UserId
}

fn record(user_id: UserId, ttl: Duration) -> RefreshTokenRecord {
    let token = Uuid::new_v4().to_string();
    RefreshTokenRecord {
        session_id: format!("sid-{token}"),
        token,
        user_id,
        expires_at: Utc::now() + ttl,
    }
}

#[tokio::test]
async fn add_get_and_delete_by_token() {
    let ledger = build_ledger().await;
    let user = unique_user();
    let rec = record(user, Duration::days(1));

    assert!(ledger.add_refresh_token(rec.clone(), 5).await.unwrap());
    let fetched = ledger.get_refresh_token(&rec.token).await.unwrap().unwrap();
    assert_eq!(fetched.user_id, user);
    assert_eq!(fetched.session_id, rec.session_id);
    assert_eq!(fetched.expires_at.timestamp(), rec.expires_at.timestamp());

    let selector = RefreshSelector::Token(rec.token.clone());
    assert_eq!(ledger.delete_refresh_token(selector.clone()).await, Ok(1));
    assert_eq!(ledger.delete_refresh_token(selector).await, Ok(0));
}

#[tokio::test]
async fn cap_and_expired_purge() {
    let ledger = build_ledger().await;
    let user = unique_user();

    assert!(ledger
        .add_refresh_token(record(user, Duration::seconds(-10)), 1)
        .await
        .unwrap());
    // the expired row is purged before counting
    assert!(ledger
        .add_refresh_token(record(user, Duration::days(1)), 1)
        .await
        .unwrap());
    assert!(!ledger
        .add_refresh_token(record(user, Duration::days(1)), 1)
        .await
        .unwrap());
    assert_eq!(ledger.count_active_sessions(user, Utc::now()).await, Ok(1));
}

#[tokio::test]
async fn rotate_replaces_old_row_at_cap() {
    let ledger = build_ledger().await;
    let user = unique_user();
    let old = record(user, Duration::days(1));
    let new = record(user, Duration::days(1));

    assert!(ledger.add_refresh_token(old.clone(), 1).await.unwrap());
    assert_eq!(ledger.rotate_refresh_token(&old.token, new.clone()).await, Ok(true));
    assert_eq!(ledger.get_refresh_token(&old.token).await.unwrap(), None);
    assert!(ledger.get_refresh_token(&new.token).await.unwrap().is_some());
    assert_eq!(ledger.count_active_sessions(user, Utc::now()).await, Ok(1));

    let again = record(user, Duration::days(1));
    assert_eq!(ledger.rotate_refresh_token(&old.token, again.clone()).await, Ok(false));
    assert_eq!(ledger.get_refresh_token(&again.token).await.unwrap(), None);
}

#[tokio::test]
async fn delete_by_session() {
    let ledger = build_ledger().await;
    let user = unique_user();
    let keep = record(user, Duration::days(1));
    let gone = record(user, Duration::days(1));
    ledger.add_refresh_token(keep.clone(), 5).await.unwrap();
    ledger.add_refresh_token(gone.clone(), 5).await.unwrap();

    let removed = ledger
        .delete_refresh_token(RefreshSelector::Session {
            user_id: user,
            session_id: gone.session_id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(ledger.get_refresh_token(&keep.token).await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_admission_respects_cap() {
    let ledger = Arc::new(build_ledger().await);
    let user = unique_user();

    let tasks: Vec<_> = (0..12)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move {
                ledger
                    .add_refresh_token(record(user, Duration::days(1)), 5)
                    .await
            })
        })
        .collect();

    let mut admitted = 0;
    for task in tasks {
        if task.await.unwrap().unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 5);
}

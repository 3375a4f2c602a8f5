use log::{error, info};
use session_auth::domain::{IdentityCache, SessionLedger};
use session_auth::services::{
    spawn_ledger_sweeper, Argon2Verifier, HashmapIdentityCache, HashmapSessionLedger,
    HashmapUserStore, MockEmailClient, RedisIdentityCache, RedisService, SqlSessionLedger,
};
use session_auth::utils::Config;
use session_auth::{build_app_state, get_db_pool, migrations, Application};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("failed to load config: {e}");
            process::exit(1);
        }
    };

    let ledger = configured_ledger(&config).await;
    let cache = configured_cache(&config);
    let app_state = build_app_state(
        config.clone(),
        ledger.clone(),
        cache,
        Arc::new(HashmapUserStore::new()),
        Arc::new(Argon2Verifier::new()),
        Arc::new(MockEmailClient::new()),
    );

    spawn_ledger_sweeper(ledger, Duration::from_secs(config.sweep_interval_seconds()));

    let app = Application::build(app_state, config.app_address())
        .await
        .expect("Failed to build app");
    app.run().await.expect("Failed to run app");
}

async fn configured_ledger(config: &Config) -> Arc<dyn SessionLedger> {
    let Some(url) = config.database_url() else {
        info!("DATABASE_URL not set, keeping sessions in memory");
        return Arc::new(HashmapSessionLedger::new());
    };
    let db_client = get_db_pool(url).await.expect("Failed to connect to database");
    if let Err(e) = migrations::up(&db_client).await {
        error!("migrations failed: {e}");
        process::exit(1);
    }
    Arc::new(SqlSessionLedger::new(db_client))
}

fn configured_cache(config: &Config) -> Arc<dyn IdentityCache> {
    match config.redis_host() {
        Some(host) => {
            let redis = RedisService::new(host).expect("Invalid redis host");
            Arc::new(RedisIdentityCache::new(Arc::new(redis)))
        }
        None => {
            info!("REDIS_HOST not set, keeping the identity cache in memory");
            Arc::new(HashmapIdentityCache::new())
        }
    }
}

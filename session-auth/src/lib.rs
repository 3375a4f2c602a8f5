use axum::{
    routing::{get, post},
    Router,
};
use axum_server::bind;
use log::info;
use std::{error::Error, future::Future, pin::Pin, sync::Arc};
use welds::connections::any::AnyClient;

use app_state::AppState;
use domain::{CredentialVerifier, EmailClient, IdentityCache, SessionLedger, UserStore};
use routes::{
    confirm_email, forgot_password, login, logout, me, refresh_token, request_email,
    reset_password, signup,
};
use services::{AuthService, TokenService};
use utils::Config;

pub mod app_state;
pub mod domain;
pub mod errors;
pub mod migrations;
pub mod routes;
pub mod services;
pub mod utils;
pub mod validation;

type ServerFuture = Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>;

pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/confirmed-email/:token", get(confirm_email))
        .route("/request-email", post(request_email))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
        .with_state(app_state)
}

/// Wire the services over the given collaborators.
pub fn build_app_state(
    config: Arc<Config>,
    ledger: Arc<dyn SessionLedger>,
    cache: Arc<dyn IdentityCache>,
    users: Arc<dyn UserStore>,
    verifier: Arc<dyn CredentialVerifier>,
    mailer: Arc<dyn EmailClient>,
) -> AppState {
    let token_service = Arc::new(TokenService::new(
        config.clone(),
        ledger,
        cache.clone(),
        users.clone(),
        verifier.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(
        token_service.clone(),
        users,
        verifier,
        mailer,
        cache,
    ));
    AppState::new(token_service, auth_service, config)
}

pub async fn get_db_pool(url: &str) -> welds::errors::Result<AnyClient> {
    Ok(welds::connections::connect(url).await?)
}

// This struct encapsulates our application-related logic.
pub struct Application {
    http_future: ServerFuture,
    // exposed so tests can reach the server
    pub address: String,
}

impl Application {
    pub async fn build(app_state: AppState, address: &str) -> Result<Self, Box<dyn Error>> {
        let router = app_router(app_state);

        let http_future = bind(address.parse()?).serve(router.into_make_service());

        Ok(Self {
            http_future: Box::pin(http_future),
            address: format!("http://{}", address),
        })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        info!("listening on {}", &self.address);
        self.http_future.await
    }
}

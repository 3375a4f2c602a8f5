use std::sync::Arc;

use crate::services::{AuthService, TokenService};
use crate::utils::Config;

pub type TokenServiceType = Arc<TokenService>;
pub type AuthServiceType = Arc<AuthService>;
pub type ConfigType = Arc<Config>;

#[derive(Clone)]
pub struct AppState {
    pub token_service: TokenServiceType,
    pub auth_service: AuthServiceType,
    pub config: ConfigType,
}

impl AppState {
    pub fn new(
        token_service: TokenServiceType,
        auth_service: AuthServiceType,
        config: ConfigType,
    ) -> Self {
        Self {
            token_service,
            auth_service,
            config,
        }
    }
}

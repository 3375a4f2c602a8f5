pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Deny-list value stored under a revoked access token.
pub const REVOKED_MARKER: &[u8] = b"revoked";
pub const CONSUMED_MARKER: &[u8] = b"consumed";

const USER_KEY_PREFIX: &str = "user:";
const CONSUMED_KEY_PREFIX: &str = "consumed:";

/// Identity-cache key for the memoized "user by email" lookup.
pub fn user_cache_key(email: &str) -> String {
    format!("{USER_KEY_PREFIX}{email}")
}

/// Identity-cache key marking a password-reset token as spent.
pub fn consumed_token_key(token: &str) -> String {
    format!("{CONSUMED_KEY_PREFIX}{token}")
}

pub mod env {
    pub const TEST_REDIS_HOST_ENV_VAR: &str = "TEST_REDIS_HOST";
    pub const REDIS_HOST_ENV_VAR: &str = "REDIS_HOST";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
}

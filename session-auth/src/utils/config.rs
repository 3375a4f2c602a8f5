use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use jsonwebtoken::Algorithm;
use thiserror::Error;

pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 900;
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;
pub const DEFAULT_EMAIL_TTL_HOURS: i64 = 24;
pub const DEFAULT_MAX_ACTIVE_SESSIONS: usize = 5;
pub const DEFAULT_APP_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_APP_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 3600;

pub const MAX_ACCESS_TTL_SECONDS: i64 = 86_400;
pub const MAX_REFRESH_TTL_DAYS: i64 = 365;
pub const MAX_EMAIL_TTL_HOURS: i64 = 720;
pub const MAX_SWEEP_INTERVAL_SECONDS: i64 = 7 * 86_400;

#[derive(Clone, Debug)]
pub struct Config {
    jwt_secret: String,
    jwt_algorithm: Algorithm,
    access_ttl_seconds: i64,
    refresh_ttl_days: i64,
    email_ttl_hours: i64,
    max_active_sessions: usize,
    database_url: Option<String>,
    redis_host: Option<String>,
    app_address: String,
    app_base_url: String,
    sweep_interval_seconds: u64,
}

impl Config {
    /// Config with every optional setting at its default.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_algorithm: Algorithm::HS256,
            access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
            refresh_ttl_days: DEFAULT_REFRESH_TTL_DAYS,
            email_ttl_hours: DEFAULT_EMAIL_TTL_HOURS,
            max_active_sessions: DEFAULT_MAX_ACTIVE_SESSIONS,
            database_url: None,
            redis_host: None,
            app_address: DEFAULT_APP_ADDRESS.to_owned(),
            app_base_url: DEFAULT_APP_BASE_URL.to_owned(),
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }

    /// Load from the process environment (and `.env` in dev).
    ///
    /// | Env Var                          | Required | Default                 |
    /// |----------------------------------|----------|-------------------------|
    /// | `JWT_SECRET`                     | **yes**  | --                      |
    /// | `JWT_ALGORITHM`                  | no       | `HS256`                 |
    /// | `ACCESS_TOKEN_TTL_SECONDS`       | no       | `900` (max `86400`)     |
    /// | `REFRESH_TOKEN_TTL_DAYS`         | no       | `7` (max `365`)         |
    /// | `EMAIL_TOKEN_TTL_HOURS`          | no       | `24` (max `720`)        |
    /// | `MAX_ACTIVE_SESSIONS`            | no       | `5`                     |
    /// | `DATABASE_URL`                   | no       | in-memory ledger        |
    /// | `REDIS_HOST`                     | no       | in-memory cache         |
    /// | `APP_ADDRESS`                    | no       | `0.0.0.0:3000`          |
    /// | `APP_BASE_URL`                   | no       | `http://localhost:3000` |
    /// | `LEDGER_SWEEP_INTERVAL_SECONDS`  | no       | `3600` (max one week)   |
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env in dev; no-op in prod if not present.
        let _ = dotenv();

        let jwt_secret = req_var("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET must not be empty"));
        }

        let jwt_algorithm = match opt_var("JWT_ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let access_ttl_seconds = parse_bounded(
            "ACCESS_TOKEN_TTL_SECONDS",
            opt_var("ACCESS_TOKEN_TTL_SECONDS"),
            DEFAULT_ACCESS_TTL_SECONDS,
            MAX_ACCESS_TTL_SECONDS,
        )?;
        let refresh_ttl_days = parse_bounded(
            "REFRESH_TOKEN_TTL_DAYS",
            opt_var("REFRESH_TOKEN_TTL_DAYS"),
            DEFAULT_REFRESH_TTL_DAYS,
            MAX_REFRESH_TTL_DAYS,
        )?;
        let email_ttl_hours = parse_bounded(
            "EMAIL_TOKEN_TTL_HOURS",
            opt_var("EMAIL_TOKEN_TTL_HOURS"),
            DEFAULT_EMAIL_TTL_HOURS,
            MAX_EMAIL_TTL_HOURS,
        )?;

        let max_active_sessions = match opt_var("MAX_ACTIVE_SESSIONS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("MAX_ACTIVE_SESSIONS"))?,
            None => DEFAULT_MAX_ACTIVE_SESSIONS,
        };

        let sweep_interval_seconds = parse_bounded(
            "LEDGER_SWEEP_INTERVAL_SECONDS",
            opt_var("LEDGER_SWEEP_INTERVAL_SECONDS"),
            DEFAULT_SWEEP_INTERVAL_SECONDS as i64,
            MAX_SWEEP_INTERVAL_SECONDS,
        )? as u64;

        Ok(Self {
            jwt_secret,
            jwt_algorithm,
            access_ttl_seconds,
            refresh_ttl_days,
            email_ttl_hours,
            max_active_sessions,
            database_url: opt_var("DATABASE_URL"),
            redis_host: opt_var("REDIS_HOST"),
            app_address: opt_var("APP_ADDRESS").unwrap_or_else(|| DEFAULT_APP_ADDRESS.into()),
            app_base_url: opt_var("APP_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_APP_BASE_URL.into()),
            sweep_interval_seconds,
        })
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.jwt_algorithm = algorithm;
        self
    }
    pub fn with_access_ttl_seconds(mut self, seconds: i64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_ttl_days = days;
        self
    }
    pub fn with_email_ttl_hours(mut self, hours: i64) -> Self {
        self.email_ttl_hours = hours;
        self
    }
    pub fn with_max_active_sessions(mut self, cap: usize) -> Self {
        self.max_active_sessions = cap;
        self
    }
    pub fn with_app_base_url(mut self, url: impl Into<String>) -> Self {
        self.app_base_url = url.into();
        self
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
    pub fn jwt_algorithm(&self) -> Algorithm {
        self.jwt_algorithm
    }
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_days * 24 * 60 * 60
    }
    pub fn email_ttl_seconds(&self) -> i64 {
        self.email_ttl_hours * 60 * 60
    }
    pub fn max_active_sessions(&self) -> usize {
        self.max_active_sessions
    }
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
    pub fn redis_host(&self) -> Option<&str> {
        self.redis_host.as_deref()
    }
    pub fn app_address(&self) -> &str {
        &self.app_address
    }
    pub fn app_base_url(&self) -> &str {
        &self.app_base_url
    }
    pub fn sweep_interval_seconds(&self) -> u64 {
        self.sweep_interval_seconds
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing env var {0}")]
    Missing(&'static str),
    #[error("invalid env var {0}")]
    Invalid(&'static str),
    #[error("unsupported signing algorithm {0}, expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(String),
}

fn req_var(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn opt_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// `raw` must parse to a value in `1..=max`; absent means `default`.
fn parse_bounded(
    key: &'static str,
    raw: Option<String>,
    default: i64,
    max: i64,
) -> Result<i64, ConfigError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| (1..=max).contains(n))
            .ok_or(ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Only HMAC algorithms work with a shared secret.
pub fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(raw.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedAlgorithm(raw.to_owned())),
    }
}

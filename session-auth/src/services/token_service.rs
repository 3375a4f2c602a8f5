/// Token issuance and validation service.
///
/// This module provides the `TokenService`, which coordinates:
/// - Login against the user store and credential verifier
/// - Creation of access and refresh JWTs (one signing primitive, two scopes)
/// - Single-use refresh token rotation through the session ledger
/// - Resolution of the current user from an access token
/// - Logout: ledger deletion, cache eviction and access token deny-listing
/// - Scope-less email tokens for confirmation and password reset links
///
/// Security model:
/// 1. Every login or rotation opens a new session id. The refresh token is
///    recorded in the ledger before the access token is signed, so a login
///    rejected at the session cap never yields a usable token.
/// 2. A rotation only succeeds for the caller whose ledger swap actually
///    removed the old row. A refresh token replayed (or raced) after rotation
///    fails `SessionNotFound`.
/// 3. Logged-out access tokens are deny-listed in the identity cache until
///    their own `exp`. A cache that cannot answer the deny-list lookup fails
///    the request closed.
///
/// Concurrency:
/// - The service holds no mutable state. Share it as `Arc<TokenService>`;
///   all collaborators synchronise internally.
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as B64, Engine};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Header};
use log::{debug, error, info, warn};
use rand::RngCore;
use uuid::Uuid;

use crate::domain::{
    Claims, CredentialVerifier, Email, IdentityCache, IssuedTokens, JwtKeyStore, RefreshSelector,
    RefreshTokenRecord, SessionLedger, TokenScope, User, UserStore, UserStoreError,
};
use crate::errors::AuthError;
use crate::utils::{user_cache_key, Config, REVOKED_MARKER};

pub struct TokenService {
    cfg: Arc<Config>,
    keys: JwtKeyStore,
    ledger: Arc<dyn SessionLedger>,
    cache: Arc<dyn IdentityCache>,
    users: Arc<dyn UserStore>,
    verifier: Arc<dyn CredentialVerifier>,
}

fn user_store_failure(e: UserStoreError) -> AuthError {
    error!("user store lookup failed: {e}");
    AuthError::UserStoreUnavailable
}

impl TokenService {
    pub fn new(
        cfg: Arc<Config>,
        ledger: Arc<dyn SessionLedger>,
        cache: Arc<dyn IdentityCache>,
        users: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let keys = JwtKeyStore::from_config(&cfg);
        Self {
            cfg,
            keys,
            ledger,
            cache,
            users,
            verifier,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Authenticate by email and password and open a new session.
    ///
    /// Unknown users, unconfirmed users and wrong passwords are all reported
    /// as `InvalidCredentials`.
    pub async fn login(&self, email: &Email, password: &str) -> Result<IssuedTokens, AuthError> {
        let user = self
            .users
            .get_user_by_email(email)
            .await
            .map_err(user_store_failure)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verifier.verify(password, &user.password_hash).await {
            debug!("login rejected for user {}: password mismatch", user.id);
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_confirmed {
            debug!("login rejected for user {}: email not confirmed", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.open_session(&user).await?;
        info!("user {} logged in", user.id);
        Ok(tokens)
    }

    /// Rotate a refresh token: the presented token is retired and a fresh
    /// session is opened in its place. The swap is one ledger step, so a
    /// failed rotation leaves the presented session usable and a concurrent
    /// login cannot take its slot.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens, AuthError> {
        let claims = self.decode(refresh_token).map_err(|e| {
            debug!("refresh token rejected: {e}");
            AuthError::InvalidToken
        })?;
        if claims.scope != Some(TokenScope::Refresh) {
            debug!("refresh rejected: token scope is {:?}", claims.scope);
            return Err(AuthError::InvalidScope);
        }

        let user = self
            .resolve_user(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        match self.ledger.get_refresh_token(refresh_token).await? {
            Some(record) if record.user_id == user.id && record.is_live_at(Utc::now()) => {}
            _ => return Err(AuthError::SessionNotFound),
        }

        let record = self.new_session_record(&user)?;
        let session_id = record.session_id.clone();
        let rotated_token = record.token.clone();
        // whoever swaps the row out owns the rotation
        if !self.ledger.rotate_refresh_token(refresh_token, record).await? {
            debug!("refresh lost rotation race for user {}", user.id);
            return Err(AuthError::SessionNotFound);
        }

        let access_token = self.sign_access_token(user.email.as_ref(), &session_id)?;
        Ok(IssuedTokens::bearer(access_token, rotated_token))
    }

    pub async fn get_current_user(&self, access_token: &str) -> Result<User, AuthError> {
        if self.is_revoked(access_token).await? {
            debug!("access token is deny-listed");
            return Err(AuthError::Unauthorized);
        }
        let claims = self.decode_access(access_token)?;
        self.resolve_user(&claims.sub).await?.ok_or_else(|| {
            warn!("access token subject no longer resolves to a user");
            AuthError::Unauthorized
        })
    }

    /// Session id of an access token, provided it was issued to `expected_email`.
    pub fn get_session_id_from_token(
        &self,
        access_token: &str,
        expected_email: &str,
    ) -> Result<String, AuthError> {
        self.session_claims(access_token, expected_email)
            .map(|(session_id, _)| session_id)
    }

    /// End the session `access_token` belongs to.
    pub async fn logout(&self, access_token: &str, current_user: &User) -> Result<(), AuthError> {
        let (session_id, exp) =
            self.session_claims(access_token, current_user.email.as_ref())?;

        let removed = self
            .ledger
            .delete_refresh_token(RefreshSelector::Session {
                user_id: current_user.id,
                session_id,
            })
            .await?;
        if removed == 0 {
            debug!("logout for user {} found no ledger record", current_user.id);
        }

        if let Err(e) = self
            .cache
            .delete(&user_cache_key(current_user.email.as_ref()))
            .await
        {
            warn!("failed to evict cached user {}: {e}", current_user.id);
        }

        // +1 keeps the entry alive through the whole second `exp` still validates in
        let remaining = exp - Utc::now().timestamp() + 1;
        if remaining > 0 {
            self.cache
                .set(access_token, REVOKED_MARKER, remaining as u64)
                .await
                .map_err(|e| {
                    error!("failed to deny-list access token: {e}");
                    AuthError::CacheUnavailable
                })?;
        }

        info!("user {} logged out", current_user.id);
        Ok(())
    }

    /// Mint an access token for `sub` under a brand new session id.
    pub fn create_access_token(&self, sub: &str) -> Result<(String, String), AuthError> {
        let session_id = new_session_id();
        let token = self.sign_access_token(sub, &session_id)?;
        Ok((token, session_id))
    }

    pub fn create_refresh_token(&self, sub: &str) -> Result<(String, DateTime<Utc>), AuthError> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(self.cfg.refresh_ttl_seconds())).timestamp();
        let claims = Claims::refresh(sub, Uuid::new_v4().to_string(), now.timestamp(), exp);
        let token = self.sign(&claims)?;
        let expires_at = DateTime::from_timestamp(exp, 0).ok_or(AuthError::Internal)?;
        Ok((token, expires_at))
    }

    pub fn create_email_token(&self, sub: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims::email(
            sub,
            Uuid::new_v4().to_string(),
            now,
            now + self.cfg.email_ttl_seconds(),
        );
        self.sign(&claims)
    }

    pub fn get_email_from_token(&self, token: &str) -> Result<String, AuthError> {
        self.decode_email_token(token).map(|claims| claims.sub)
    }

    /// Full claims of an email token; callers that need `exp` use this.
    pub fn decode_email_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(token).map_err(|e| {
            debug!("email token rejected: {e}");
            AuthError::InvalidEmailToken
        })?;
        if claims.scope.is_some() {
            debug!("email token rejected: carries scope {:?}", claims.scope);
            return Err(AuthError::InvalidEmailToken);
        }
        Ok(claims)
    }

    fn new_session_record(&self, user: &User) -> Result<RefreshTokenRecord, AuthError> {
        let (token, expires_at) = self.create_refresh_token(user.email.as_ref())?;
        Ok(RefreshTokenRecord {
            token,
            user_id: user.id,
            session_id: new_session_id(),
            expires_at,
        })
    }

    async fn open_session(&self, user: &User) -> Result<IssuedTokens, AuthError> {
        let record = self.new_session_record(user)?;
        let session_id = record.session_id.clone();
        let refresh_token = record.token.clone();
        let admitted = self
            .ledger
            .add_refresh_token(record, self.cfg.max_active_sessions())
            .await?;
        if !admitted {
            info!(
                "user {} is at the session cap of {}",
                user.id,
                self.cfg.max_active_sessions()
            );
            return Err(AuthError::TooManySessions);
        }

        let access_token = self.sign_access_token(user.email.as_ref(), &session_id)?;
        Ok(IssuedTokens::bearer(access_token, refresh_token))
    }

    /// Cache first, then the user store. Cache trouble only costs a lookup.
    async fn resolve_user(&self, sub: &str) -> Result<Option<User>, AuthError> {
        let key = user_cache_key(sub);
        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<User>(&bytes) {
                Ok(user) => return Ok(Some(user)),
                Err(e) => warn!("discarding undecodable cached user: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("identity cache read failed, using user store: {e}"),
        }

        let Ok(email) = Email::parse(sub.to_owned()) else {
            debug!("token subject is not an email address");
            return Ok(None);
        };
        let user = self
            .users
            .get_user_by_email(&email)
            .await
            .map_err(user_store_failure)?;

        if let Some(user) = &user {
            match serde_json::to_vec(user) {
                Ok(bytes) => {
                    let ttl = self.cfg.access_ttl_seconds().max(0) as u64;
                    if let Err(e) = self.cache.set(&key, &bytes, ttl).await {
                        warn!("failed to cache user {}: {e}", user.id);
                    }
                }
                Err(e) => warn!("failed to serialise user {}: {e}", user.id),
            }
        }
        Ok(user)
    }

    async fn is_revoked(&self, access_token: &str) -> Result<bool, AuthError> {
        self.cache
            .get(access_token)
            .await
            .map(|hit| hit.is_some())
            .map_err(|e| {
                error!("deny-list lookup failed: {e}");
                AuthError::CacheUnavailable
            })
    }

    fn session_claims(
        &self,
        access_token: &str,
        expected_email: &str,
    ) -> Result<(String, i64), AuthError> {
        let claims = self.decode_access(access_token)?;
        if claims.sub != expected_email {
            debug!("access token subject does not match the current user");
            return Err(AuthError::Unauthorized);
        }
        let session_id = claims.session_id.ok_or(AuthError::Unauthorized)?;
        Ok((session_id, claims.exp))
    }

    fn decode_access(&self, access_token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(access_token).map_err(|e| {
            debug!("access token rejected: {e}");
            AuthError::Unauthorized
        })?;
        if claims.scope != Some(TokenScope::Access) {
            debug!("access rejected: token scope is {:?}", claims.scope);
            return Err(AuthError::Unauthorized);
        }
        Ok(claims)
    }

    fn sign_access_token(&self, sub: &str, session_id: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims::access(
            sub,
            session_id,
            Uuid::new_v4().to_string(),
            now,
            now + self.cfg.access_ttl_seconds(),
        );
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(
            &Header::new(self.keys.algorithm()),
            claims,
            self.keys.encoding_key(),
        )
        .map_err(|e| {
            error!("failed to sign token: {e}");
            AuthError::Internal
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, self.keys.decoding_key(), &self.keys.validation())
            .map(|data| data.claims)
    }
}

fn new_session_id() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    B64.encode(bytes)
}

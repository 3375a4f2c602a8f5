use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info, warn};

use super::TokenService;
use crate::domain::{
    CredentialVerifier, Email, EmailClient, EmailKind, IdentityCache, NewUser, Password, User,
    UserStore, UserStoreError,
};
use crate::errors::{EmailFlowError, SignupError};
use crate::utils::{consumed_token_key, user_cache_key, CONSUMED_MARKER};
use crate::validation::{is_valid_username, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH};

#[derive(Debug, PartialEq)]
pub enum ConfirmOutcome {
    Confirmed,
    AlreadyConfirmed,
}

/// Account lifecycle around the token service: signup, email confirmation
/// and password reset. Email links carry scope-less email tokens.
pub struct AuthService {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
    verifier: Arc<dyn CredentialVerifier>,
    mailer: Arc<dyn EmailClient>,
    cache: Arc<dyn IdentityCache>,
}

impl AuthService {
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
        mailer: Arc<dyn EmailClient>,
        cache: Arc<dyn IdentityCache>,
    ) -> Self {
        Self {
            tokens,
            users,
            verifier,
            mailer,
            cache,
        }
    }

    pub async fn signup(
        &self,
        username: String,
        email: Email,
        password: Password,
    ) -> Result<User, SignupError> {
        if !is_valid_username(&username) {
            return Err(SignupError::InvalidUsername(
                MIN_USERNAME_LENGTH,
                MAX_USERNAME_LENGTH,
            ));
        }

        let password_hash = self
            .verifier
            .hash(password.as_ref())
            .await
            .map_err(|e| {
                error!("signup failed to hash password: {e}");
                SignupError::InternalServerError
            })?;

        let user = self
            .users
            .add_user(NewUser::new(username, email, password_hash))
            .await
            .map_err(|e| match e {
                UserStoreError::EmailTaken => SignupError::EmailTaken,
                UserStoreError::UsernameTaken => SignupError::UsernameTaken,
                e => {
                    error!("signup failed to store user: {e}");
                    SignupError::InternalServerError
                }
            })?;
        info!("user {} signed up", user.id);

        // the account exists either way; the user can ask for the mail again
        if let Err(e) = self.send_link(&user, EmailKind::Confirm).await {
            warn!("confirmation mail for user {} not sent: {e}", user.id);
        }
        Ok(user)
    }

    pub async fn confirm_email(&self, token: &str) -> Result<ConfirmOutcome, EmailFlowError> {
        let email = self.email_from_token(token)?;
        let user = self.find_user(&email).await?;
        if user.is_confirmed {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        self.users.confirm_email(&email).await.map_err(|e| {
            error!("failed to confirm user {}: {e}", user.id);
            EmailFlowError::Unavailable
        })?;
        self.evict(&email).await;
        info!("user {} confirmed their email", user.id);
        Ok(ConfirmOutcome::Confirmed)
    }

    /// Re-send the confirmation link. Silent for unknown or confirmed
    /// addresses so the endpoint does not reveal which accounts exist.
    pub async fn request_email(&self, email: &Email) -> Result<(), EmailFlowError> {
        match self.lookup(email).await? {
            Some(user) if !user.is_confirmed => self.send_link(&user, EmailKind::Confirm).await,
            _ => {
                debug!("confirmation mail not re-sent: no unconfirmed account");
                Ok(())
            }
        }
    }

    pub async fn forgot_password(&self, email: &Email) -> Result<(), EmailFlowError> {
        match self.lookup(email).await? {
            Some(user) => self.send_link(&user, EmailKind::ResetPassword).await,
            None => {
                debug!("reset mail not sent: no account");
                Ok(())
            }
        }
    }

    /// Store a new password hash. Each reset token works exactly once.
    pub async fn reset_password(
        &self,
        token: &str,
        password: Password,
    ) -> Result<(), EmailFlowError> {
        let claims = self
            .tokens
            .decode_email_token(token)
            .map_err(|_| EmailFlowError::InvalidEmailToken)?;
        let consumed_key = consumed_token_key(token);
        let consumed = self.cache.get(&consumed_key).await.map_err(|e| {
            error!("consumed-token lookup failed: {e}");
            EmailFlowError::Unavailable
        })?;
        if consumed.is_some() {
            return Err(EmailFlowError::TokenAlreadyUsed);
        }

        let email = Email::parse(claims.sub).map_err(|_| EmailFlowError::InvalidEmailToken)?;
        let user = self.find_user(&email).await?;

        let password_hash = self.verifier.hash(password.as_ref()).await.map_err(|e| {
            error!("reset failed to hash password: {e}");
            EmailFlowError::Unavailable
        })?;
        self.users
            .update_password(&email, password_hash)
            .await
            .map_err(|e| {
                error!("failed to update password for user {}: {e}", user.id);
                EmailFlowError::Unavailable
            })?;
        self.evict(&email).await;

        let remaining = claims.exp - Utc::now().timestamp() + 1;
        if remaining > 0 {
            if let Err(e) = self
                .cache
                .set(&consumed_key, CONSUMED_MARKER, remaining as u64)
                .await
            {
                error!("failed to mark reset token consumed for user {}: {e}", user.id);
            }
        }
        info!("user {} reset their password", user.id);
        Ok(())
    }

    fn email_from_token(&self, token: &str) -> Result<Email, EmailFlowError> {
        let sub = self
            .tokens
            .get_email_from_token(token)
            .map_err(|_| EmailFlowError::InvalidEmailToken)?;
        Email::parse(sub).map_err(|_| EmailFlowError::InvalidEmailToken)
    }

    async fn lookup(&self, email: &Email) -> Result<Option<User>, EmailFlowError> {
        self.users.get_user_by_email(email).await.map_err(|e| {
            error!("user store lookup failed: {e}");
            EmailFlowError::Unavailable
        })
    }

    async fn find_user(&self, email: &Email) -> Result<User, EmailFlowError> {
        self.lookup(email).await?.ok_or(EmailFlowError::UserNotFound)
    }

    async fn evict(&self, email: &Email) {
        if let Err(e) = self.cache.delete(&user_cache_key(email.as_ref())).await {
            warn!("failed to evict cached user: {e}");
        }
    }

    async fn send_link(&self, user: &User, kind: EmailKind) -> Result<(), EmailFlowError> {
        let token = self
            .tokens
            .create_email_token(user.email.as_ref())
            .map_err(|_| EmailFlowError::Unavailable)?;
        let path = match kind {
            EmailKind::Confirm => "confirmed-email",
            EmailKind::ResetPassword => "reset-password",
        };
        let link = format!("{}/{}/{}", self.tokens.config().app_base_url(), path, token);

        self.mailer
            .send_email(kind, &user.email, &user.username, &link)
            .await
            .map_err(|e| {
                error!("failed to send {:?} mail to user {}: {e}", kind, user.id);
                EmailFlowError::Unavailable
            })
    }
}

use super::UserStoreError;
use crate::domain::{Email, NewUser, User};

/// The user-repository collaborator. The token service only reads through
/// `get_user_by_email`; the account flows use the rest.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn confirm_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn update_password(&self, email: &Email, password_hash: String)
        -> Result<User, UserStoreError>;
}

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Email, NewUser, User, UserId, UserStore, UserStoreError};

#[derive(Default)]
struct Users {
    by_email: HashMap<Email, User>,
    next_id: UserId,
}

/// In-process user repository used by the binary without a user database
/// and by the tests.
#[derive(Default)]
pub struct HashmapUserStore {
    users: RwLock<Users>,
}

impl HashmapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify(
        &self,
        email: &Email,
        change: impl FnOnce(&mut User),
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .by_email
            .get_mut(email)
            .ok_or(UserStoreError::UserNotFound)?;
        change(user);
        Ok(user.clone())
    }
}

#[async_trait::async_trait]
impl UserStore for HashmapUserStore {
    async fn get_user_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.by_email.get(email).cloned())
    }

    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_email.contains_key(&user.email) {
            return Err(UserStoreError::EmailTaken);
        }
        if users.by_email.values().any(|u| u.username == user.username) {
            return Err(UserStoreError::UsernameTaken);
        }

        users.next_id += 1;
        let stored = User {
            id: users.next_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_confirmed: false,
            created_at: Utc::now(),
        };
        users.by_email.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn confirm_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.modify(email, |user| user.is_confirmed = true).await
    }

    async fn update_password(
        &self,
        email: &Email,
        password_hash: String,
    ) -> Result<User, UserStoreError> {
        self.modify(email, |user| user.password_hash = password_hash)
            .await
    }
}

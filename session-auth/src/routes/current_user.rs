use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app_state::AppState;
use crate::domain::User;
use crate::errors::AuthError;
use crate::utils::bearer_token;

/// The authenticated caller of a protected route, resolved from the
/// `Authorization: Bearer <access token>` header.
pub struct CurrentUser {
    pub user: User,
    pub access_token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access_token = bearer_token(&parts.headers)
            .ok_or(AuthError::Unauthorized)?
            .to_owned();
        let user = state.token_service.get_current_user(&access_token).await?;
        Ok(Self { user, access_token })
    }
}

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::IssuedTokens;
use crate::errors::AuthError;
use crate::utils::bearer_token;

/// Expects the refresh token as `Authorization: Bearer <refresh token>`.
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<IssuedTokens>, AuthError> {
    let refresh_token = bearer_token(&headers).ok_or(AuthError::Unauthorized)?;
    let tokens = state.token_service.refresh(refresh_token).await?;
    Ok(Json(tokens))
}

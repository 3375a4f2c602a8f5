use axum::extract::State;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::{Email, IssuedTokens, LoginRequestBody};
use crate::errors::LoginError;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequestBody>,
) -> Result<Json<IssuedTokens>, LoginError> {
    let email = Email::parse(request.email).or(Err(LoginError::InvalidEmail))?;
    let tokens = state.token_service.login(&email, &request.password).await?;
    Ok(Json(tokens))
}

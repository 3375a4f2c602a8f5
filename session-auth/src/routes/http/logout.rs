use axum::extract::State;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::MessageResponse;
use crate::errors::AuthError;
use crate::routes::CurrentUser;

pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<MessageResponse>, AuthError> {
    state
        .token_service
        .logout(&current.access_token, &current.user)
        .await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

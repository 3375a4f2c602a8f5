use axum::extract::{Path, State};
use axum::Json;

use crate::app_state::AppState;
use crate::domain::{Email, EmailRequestBody, MessageResponse, Password, ResetPasswordRequestBody};
use crate::errors::EmailFlowError;

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<EmailRequestBody>,
) -> Result<Json<MessageResponse>, EmailFlowError> {
    let email = Email::parse(request.email).or(Err(EmailFlowError::InvalidEmail))?;
    state.auth_service.forgot_password(&email).await?;
    Ok(Json(MessageResponse::new(
        "If the account exists, a password reset email is on its way",
    )))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequestBody>,
) -> Result<Json<MessageResponse>, EmailFlowError> {
    if request.password != request.password2 {
        return Err(EmailFlowError::PasswordsDoNotMatch);
    }
    let password = Password::parse(request.password).or(Err(EmailFlowError::InvalidPassword))?;
    state.auth_service.reset_password(&token, password).await?;
    Ok(Json(MessageResponse::new("Your password has been updated")))
}

use axum::extract::{Path, State};
use axum::Json;

use crate::app_state::AppState;
use crate::domain::{Email, EmailRequestBody, MessageResponse};
use crate::errors::EmailFlowError;
use crate::services::ConfirmOutcome;

pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, EmailFlowError> {
    let message = match state.auth_service.confirm_email(&token).await? {
        ConfirmOutcome::Confirmed => "Your email has been confirmed",
        ConfirmOutcome::AlreadyConfirmed => "Your email is already confirmed",
    };
    Ok(Json(MessageResponse::new(message)))
}

pub async fn request_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequestBody>,
) -> Result<Json<MessageResponse>, EmailFlowError> {
    let email = Email::parse(request.email).or(Err(EmailFlowError::InvalidEmail))?;
    state.auth_service.request_email(&email).await?;
    Ok(Json(MessageResponse::new(
        "If the account exists and is unconfirmed, a confirmation email is on its way",
    )))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::{Email, Password, SignupRequestBody, UserResponse};
use crate::errors::SignupError;

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequestBody>,
) -> Result<impl IntoResponse, SignupError> {
    let email = Email::parse(request.email).or(Err(SignupError::InvalidEmail))?;
    let password = Password::parse(request.password).or(Err(SignupError::InvalidPassword))?;

    let user = state
        .auth_service
        .signup(request.username, email, password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

use axum::Json;

use crate::domain::UserResponse;
use crate::routes::CurrentUser;

pub async fn me(current: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&current.user))
}

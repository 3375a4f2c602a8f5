use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct ResetPasswordRequestBody {
    pub password: String,
    pub password2: String,
}

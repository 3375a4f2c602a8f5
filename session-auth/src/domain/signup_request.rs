use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequestBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

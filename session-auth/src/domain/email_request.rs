use serde::{Deserialize, Serialize};

/// Body for `/request-email` and `/forgot-password`.
#[derive(Deserialize, Serialize, Debug)]
pub struct EmailRequestBody {
    pub email: String,
}

use serde::{Deserialize, Serialize};

use crate::validation::is_valid_email;

#[derive(PartialEq, Debug, Clone, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(email: String) -> Result<Email, String> {
        let email = email.trim().to_owned();
        match is_valid_email(&email) {
            true => Ok(Email(email)),
            false => Err(format!("Email {} is not valid", email)),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

use crate::validation::is_valid_password;

/// A plaintext password that passed the strength rules. Never stored.
#[derive(PartialEq, Debug)]
pub struct Password(String);

impl Password {
    pub fn parse(password: String) -> Result<Password, String> {
        match is_valid_password(&password) {
            true => Ok(Password(password)),
            false => Err("Password is not valid, must be 8 to 72 characters long and contain a lowercase letter, an uppercase letter, a digit and a special character.".to_owned()),
        }
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

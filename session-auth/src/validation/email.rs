use once_cell::sync::Lazy;
use regex::Regex;

/// Longest address the user store accepts.
pub const MAX_EMAIL_LENGTH: usize = 150;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?xi) ^[A-Z0-9._%+-]+@[A-Z0-9-]+(?:\.[A-Z0-9-]+)*\.[A-Z]{2,}$")
        .expect("email regex must compile")
});

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(email)
}

use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 72;
/// The sample shown in API docs; never accepted as a real password.
pub const EXAMPLE_PASSWORD: &str = "Password123!";

static LOWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));

/// True if pw is 8..=72 chars with a lowercase, an uppercase, a digit and a
/// special char, and is not the documented example password.
pub fn is_valid_password(pw: &str) -> bool {
    let len = pw.chars().count();
    (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len)
        && LOWER_RE.is_match(pw)
        && UPPER_RE.is_match(pw)
        && DIGIT_RE.is_match(pw)
        && SPECIAL_RE.is_match(pw)
        && pw != EXAMPLE_PASSWORD
}

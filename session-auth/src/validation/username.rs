pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 255;

pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) && username.trim() == username
}

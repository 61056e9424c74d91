//! Credential validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum accepted password length (bcrypt ignores bytes past 72 anyway)
pub const PASSWORD_MAX_LENGTH: usize = 128;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Trims and lowercases an email so lookups are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check if a password length is within the accepted bounds
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len)
}

/// Default display name: the local part of the email address
pub fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

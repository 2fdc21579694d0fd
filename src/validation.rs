//! # Input Validation
//!
//! Standalone validators staged for the domain layer to come (user
//! registration, product input). Unused by the current resolvers.

use thiserror::Error;

/// Minimum password length in bytes.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validation failure with a user-presentable message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email cannot be empty")]
    EmptyEmail,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,
    #[error("password must contain at least one uppercase letter")]
    PasswordMissingUppercase,
    #[error("password must contain at least one digit")]
    PasswordMissingDigit,
    #[error("{0} cannot be empty")]
    EmptyField(String),
}

/// Validate an email address shape: one `@`, non-empty local part, and
/// a domain containing a dot. Deliverability is not checked.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a password: minimum length, at least one ASCII uppercase
/// letter, at least one ASCII digit.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    Ok(())
}

/// Validate that a field is non-empty after trimming whitespace.
pub fn validate_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(())
}

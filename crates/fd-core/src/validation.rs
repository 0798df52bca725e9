use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Longest text accepted on either side of a card.
pub const MAX_CARD_TEXT_LEN: usize = 2000;

/// Longest media URL accepted on a card.
pub const MAX_MEDIA_URL_LEN: usize = 2048;

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email cannot be empty".to_string()));
    }

    if !email.validate_email() {
        return Err(CoreError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if !(8..=128).contains(&len) {
        return Err(CoreError::Validation(
            "Password must be between 8 and 128 characters long".to_string(),
        ));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_number = password.chars().any(char::is_numeric);

    if !has_letter || !has_number {
        return Err(CoreError::Validation(
            "Password must contain at least one letter and one number".to_string(),
        ));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if !(3..=30).contains(&username.len()) {
        return Err(CoreError::Validation(
            "Username must be between 3 and 30 characters long".to_string(),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(
            "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
        ));
    }

    Ok(())
}

/// Validate one side of a card. `side` names the field in the error.
pub fn validate_card_text(side: &str, text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(format!("Card {side} cannot be empty")));
    }

    if text.chars().count() > MAX_CARD_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "Card {side} must be at most {MAX_CARD_TEXT_LEN} characters long"
        )));
    }

    Ok(())
}

/// Validate an optional media URL (image or audio) on a card draft.
///
/// Blank is fine and means "no media". Anything else must be an http(s) URL.
pub fn validate_media_url(field: &str, url: &str) -> Result<(), CoreError> {
    let url = url.trim();
    if url.is_empty() {
        return Ok(());
    }

    if url.len() > MAX_MEDIA_URL_LEN {
        return Err(CoreError::Validation(format!("{field} is too long")));
    }

    if !(url.starts_with("https://") || url.starts_with("http://")) || !url.validate_url() {
        return Err(CoreError::Validation(format!(
            "{field} must be an http or https URL"
        )));
    }

    Ok(())
}

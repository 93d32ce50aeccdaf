use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must contain only alphanumeric characters")]
    NotAlphanumeric,
}

/// Message shown when a login attempt is rejected.
pub const INVALID_USER_ID_MESSAGE: &str =
    "Please enter a valid User ID (alphanumeric characters only)";

/// A user id is valid when it is non-blank and made only of ASCII letters
/// and digits.
pub fn is_valid_user_id(input: &str) -> bool {
    check_user_id(input).is_ok()
}

pub fn check_user_id(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if !input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::NotAlphanumeric);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_alphanumeric_ids() {
        assert!(is_valid_user_id("user123"));
        assert!(is_valid_user_id("A"));
        assert!(is_valid_user_id("0042"));
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(check_user_id(""), Err(ValidationError::Empty));
        assert_eq!(check_user_id("   \t"), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_separators_and_non_ascii() {
        for input in ["user-1", "user_1", "user 1", " user1", "usér", "用户"] {
            assert!(!is_valid_user_id(input), "{input:?} should be rejected");
        }
    }

    #[test]
    fn missing_input_is_invalid() {
        let missing: Option<&str> = None;
        assert!(!missing.is_some_and(is_valid_user_id));
    }
}

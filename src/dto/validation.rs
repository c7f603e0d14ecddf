//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::player::normalize_name;

/// Longest accepted player name, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 32;

/// Validates that a player name is non-blank, reasonably short and printable.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("Jo")      // Ok
/// validate_player_name("   ")     // Err - blank
/// validate_player_name("a\tb")    // Err - control character
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("player_name_blank");
        err.message = Some("Player name must not be blank".into());
        return Err(err);
    }

    // Measured on the stored form; some letters grow when uppercased.
    let length = normalize_name(trimmed).chars().count();
    if length > MAX_PLAYER_NAME_LEN {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!("Player name must be at most {MAX_PLAYER_NAME_LEN} characters (got {length})")
                .into(),
        );
        return Err(err);
    }

    if trimmed.chars().any(char::is_control) {
        let mut err = ValidationError::new("player_name_format");
        err.message = Some("Player name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_name_valid() {
        assert!(validate_player_name("jo").is_ok());
        assert!(validate_player_name("  Mary Ann ").is_ok());
        assert!(validate_player_name("Zoë").is_ok());
    }

    #[test]
    fn test_validate_player_name_blank() {
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
    }

    #[test]
    fn test_validate_player_name_invalid_format() {
        assert!(validate_player_name(&"x".repeat(MAX_PLAYER_NAME_LEN + 1)).is_err());
        assert!(validate_player_name("a\tb").is_err());
        assert!(validate_player_name("line\nbreak").is_err());
    }

    #[test]
    fn test_validate_player_name_counts_uppercased_length() {
        let sharp_s = "ß".repeat(MAX_PLAYER_NAME_LEN / 2 + 1);
        assert_eq!(sharp_s.chars().count(), MAX_PLAYER_NAME_LEN / 2 + 1);
        assert!(validate_player_name(&sharp_s).is_err());
        assert!(validate_player_name(&"ß".repeat(MAX_PLAYER_NAME_LEN / 2)).is_ok());
    }
}

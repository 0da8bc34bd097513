//! Input validation for template fields.

use crate::error::CoreError;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Unwrap a required request field, naming it in the error when absent.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// A title must contain at least one non-whitespace character.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

/// Config must be a JSON object. Its keys are free-form.
pub fn validate_config(config: &serde_json::Value) -> Result<(), CoreError> {
    if !config.is_object() {
        return Err(CoreError::Validation(
            "config must be a JSON object".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn require_reports_field_name() {
        let err = require::<String>(None, "content").unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg == "content is required");
        assert_eq!(require(Some(3), "n").unwrap(), 3);
    }

    #[test]
    fn blank_title_rejected() {
        assert_matches!(validate_title(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
        assert!(validate_title("Welcome email").is_ok());
    }

    #[test]
    fn overlong_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert_matches!(validate_title(&title), Err(CoreError::Validation(_)));
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
    }

    #[test]
    fn config_must_be_object() {
        assert!(validate_config(&json!({})).is_ok());
        assert!(validate_config(&json!({"style": {"color": "red"}})).is_ok());
        assert_matches!(validate_config(&json!([])), Err(CoreError::Validation(_)));
        assert_matches!(validate_config(&json!("x")), Err(CoreError::Validation(_)));
        assert_matches!(validate_config(&json!(null)), Err(CoreError::Validation(_)));
    }
}

//! Validation error types

use std::fmt;

/// Validation error for request payloads and query parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric parameter outside its accepted range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: Option<i64>,
        value: i64,
    },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body, query string or path could not be decoded at all
    Malformed { part: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::OutOfRange {
                field,
                min,
                max: Some(max),
                value,
            } => write!(f, "{} must be between {} and {}, got {}", field, min, max, value),
            Self::OutOfRange {
                field,
                min,
                max: None,
                value,
            } => write!(f, "{} must be at least {}, got {}", field, min, value),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { part, reason } => write!(f, "invalid {}: {}", part, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Request payloads that check their own field rules after decoding
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Check a required text field: non-blank and at most `max` characters.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    non_blank(field, value)?;
    max_text(field, value, max)
}

/// Check a required text field with no length limit.
pub fn non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Check an optional text field against a maximum length.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => max_text(field, v, max),
        None => Ok(()),
    }
}

fn max_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 255,
        };
        assert_eq!(err.to_string(), "name exceeds maximum length of 255 characters");

        let err = ValidationError::OutOfRange {
            field: "limit",
            min: 1,
            max: Some(500),
            value: 0,
        };
        assert_eq!(err.to_string(), "limit must be between 1 and 500, got 0");
    }

    #[test]
    fn required_text_rules() {
        assert!(required_text("name", "Table 14.1", 255).is_ok());
        assert_eq!(
            required_text("name", "   ", 255),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            required_text("name", &"x".repeat(256), 255),
            Err(ValidationError::TooLong { field: "name", max: 255 })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 50 two-byte characters fit a 50 character limit
        let status = "é".repeat(50);
        assert!(optional_text("status", Some(&status), 50).is_ok());
        assert!(optional_text("status", None, 50).is_ok());
    }
}

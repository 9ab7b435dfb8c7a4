//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or only whitespace) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Identifier must be a positive integer
    NotPositive { field: &'static str, value: i64 },

    /// Value could not be parsed into the expected shape
    InvalidFormat { field: &'static str, reason: String },

    /// None of the alternative lookup keys were supplied
    MissingKey { fields: &'static [&'static str] },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be greater than 0 (got {})", field, value)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MissingKey { fields } => {
                write!(f, "please provide either {}", fields.join(" or "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum length for any free-text field (names, breeds)
pub const MAX_TEXT_LEN: usize = 255;

/// Trim and check a required text field.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(trimmed.to_owned())
}

/// Check that an identifier is strictly positive.
pub fn positive_id(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

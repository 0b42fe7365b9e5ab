// SPDX-License-Identifier: MPL-2.0
//! Client-side validation of form input.

use crate::config::MAX_CONTENT_CHARS;
use std::fmt;

/// Reasons a form submission is refused before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    InvalidEmail,
    EmptyContent,
    ContentTooLong { max: usize },
}

impl ValidationError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Self::EmptyName => "validation-empty-name",
            Self::InvalidEmail => "validation-invalid-email",
            Self::EmptyContent => "validation-empty-content",
            Self::ContentTooLong { .. } => "validation-content-too-long",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyContent => write!(f, "message is empty"),
            Self::ContentTooLong { max } => write!(f, "message is longer than {max} characters"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trims a card body and checks it is neither blank nor too long.
pub fn validate_content(content: &str) -> Result<String, ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong {
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

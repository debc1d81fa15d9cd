//! Error types for the meeting-minutes form model

use thiserror::Error;

/// Errors that can occur while decoding, configuring or persisting form state
#[derive(Error, Debug)]
pub enum FormError {
    /// A form field name did not match any known list shape
    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),

    /// A date string could not be parsed or does not exist in its calendar
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A stored or requested theme mode is not one of light/dark/auto
    #[error("Unknown theme mode: {0}")]
    UnknownThemeMode(String),

    /// Preference storage failed (disabled, full, or access denied)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A browser API call failed
    #[error("JavaScript error: {0}")]
    JavaScript(String),
}

impl FormError {
    /// Create an invalid field name error
    pub fn invalid_field_name<S: Into<String>>(name: S) -> Self {
        Self::InvalidFieldName(name.into())
    }

    /// Create an invalid date error
    pub fn invalid_date<S: Into<String>>(value: S) -> Self {
        Self::InvalidDate(value.into())
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a JavaScript error
    pub fn javascript<S: Into<String>>(msg: S) -> Self {
        Self::JavaScript(msg.into())
    }

    /// Failures of the browser environment rather than of the page markup or config
    pub fn is_environmental(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::JavaScript(_))
    }
}

/// Result type for form operations
pub type FormResult<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FormError::invalid_field_name("attendees-x");
        assert!(matches!(err, FormError::InvalidFieldName(_)));
        assert_eq!(err.to_string(), "Invalid field name: attendees-x");
    }

    #[test]
    fn test_environmental_errors() {
        assert!(FormError::storage("quota exceeded").is_environmental());
        assert!(FormError::javascript("showPicker threw").is_environmental());
        assert!(!FormError::invalid_date("2024-13-01").is_environmental());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: FormError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FormError::Json(_)));
    }
}

//! Custom error types for the ledger engine
//!
//! The computations themselves never fail; errors only arise when building
//! validated inputs (paydays, recurrence patterns, settings).

use thiserror::Error;

/// The main error type for ledger-core operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),
}

impl LedgerError {
    /// Create a validation error for an out-of-range day value
    pub fn day_out_of_range(field: &'static str, value: u32, max: u32) -> Self {
        Self::Validation(format!("{} must be between 1 and {}, got {}", field, max, value))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger-core operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_day_out_of_range() {
        let err = LedgerError::day_out_of_range("payday", 32, 31);
        assert_eq!(
            err.to_string(),
            "Validation error: payday must be between 1 and 31, got 32"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: LedgerError = json_err.into();
        assert!(matches!(err, LedgerError::Json(_)));
    }
}

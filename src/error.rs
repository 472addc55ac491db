//! Custom error types for budget-rules
//!
//! The calculation core only ever raises [`BudgetError::InvalidConfiguration`].
//! The remaining variants belong to the settings, import and CLI layers that
//! wrap the core.

use thiserror::Error;

/// The main error type for budget-rules operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Misuse of the calculation core: a custom period without a positive
    /// day count, an unknown period type or rule name, an out-of-range
    /// savings percentage
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Settings file problems
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed transaction or goal input
    #[error("Import error: {0}")]
    Import(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl BudgetError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a "not found" error for saving goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is an invalid configuration error
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BudgetError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for budget-rules operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::invalid_config("custom period requires a day count");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: custom period requires a day count"
        );
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::goal_not_found("Vacation");
        assert_eq!(err.to_string(), "Goal not found: Vacation");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_configuration());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetError = io_err.into();
        assert!(matches!(err, BudgetError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: BudgetError = json_err.into();
        assert!(matches!(err, BudgetError::Json(_)));
    }
}

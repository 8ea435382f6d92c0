/// Error types for recipe-store
///
/// Every store operation returns these as plain values. Absence of a single
/// row is not an error: fetches return `Ok(None)` for that.

use std::time::Duration;
use thiserror::Error;

/// Main error type for recipe-store operations
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Anything the database driver reports, passed through unchanged
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (creating the database directory, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied field could not be turned into a typed value
    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    /// The store did not answer within the configured deadline
    #[error("Database call timed out after {0:?}")]
    Timeout(Duration),

    /// Recipe id that a caller required to exist
    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    /// Stored published date is not a date
    #[error("Invalid published date: {0}")]
    InvalidDate(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for recipe-store operations
pub type Result<T> = std::result::Result<T, RecipeError>;

impl RecipeError {
    /// Shorthand for building a validation error
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        RecipeError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Convert RecipeError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RecipeError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            RecipeError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            RecipeError::Validation { field, reason } => {
                format!("Field '{}' is invalid: {}", field, reason)
            }
            RecipeError::Timeout(after) => {
                format!("The database did not respond within {} ms", after.as_millis())
            }
            RecipeError::RecipeNotFound(id) => format!("Recipe {} does not exist", id),
            RecipeError::InvalidDate(raw) => {
                format!("Stored published date '{}' could not be read", raw)
            }
            RecipeError::Config(msg) => format!("Configuration issue: {}", msg),
            RecipeError::Serialization(e) => format!("Data format error: {}", e),
        }
    }

    /// True for errors caused by caller input rather than the store
    pub fn is_validation(&self) -> bool {
        matches!(self, RecipeError::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = RecipeError::RecipeNotFound(42);
        assert!(err.user_message().contains("42"));

        let err = RecipeError::Timeout(Duration::from_millis(250));
        assert!(err.user_message().contains("250 ms"));
    }

    #[test]
    fn test_validation_display() {
        let err = RecipeError::validation("preparation-time", "expected a whole number");
        let display = format!("{}", err);
        assert!(display.contains("preparation-time"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_database_error_is_not_validation() {
        let err = RecipeError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("Database error"));
    }
}

//! Custom error types for grocery-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for grocery-cli operations
#[derive(Error, Debug)]
pub enum GroceryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Product catalogue request failed
    #[error("Catalogue error: {0}")]
    Catalogue(String),

    /// Translation service failed
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Reading from the list store failed
    #[error("Store read failed: {0}")]
    StoreRead(String),

    /// Writing to the list store failed
    #[error("Store write failed: {0}")]
    StoreWrite(String),

    /// Session persistence errors
    #[error("Session error: {0}")]
    Session(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(String),
}

impl GroceryError {
    /// Create a "not found" error for folders
    pub fn folder_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Folder",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for sessions
    pub fn session_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Session",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for search results
    pub fn search_result_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Search result",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for GroceryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GroceryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for GroceryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for grocery-cli operations
pub type GroceryResult<T> = Result<T, GroceryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GroceryError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = GroceryError::folder_not_found("home");
        assert_eq!(err.to_string(), "Folder not found: home");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GroceryError = io_err.into();
        assert!(matches!(err, GroceryError::Io(_)));
    }
}

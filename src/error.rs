//! Unified error type for the clipboard history core.
//!
//! Service-level APIs return `Result<T, AppError>`; the DAO layer keeps
//! `anyhow::Result` with context and converts at the service boundary.

use std::fmt;

/// Application error, organized by failure domain.
///
/// Validation failures never surface to the UI through this type — the
/// classifier rejects inadmissible samples by returning `None`. The variant
/// exists for misuse of mutation operations (e.g. renaming a text record).
#[derive(Debug, Clone)]
pub enum AppError {
    /// Clipboard access errors (reading, writing, format conversion)
    Clipboard(String),

    /// Storage/database errors (SQLite, Diesel, connection pool)
    Storage(String),

    /// Invalid input or constraint violations on mutations
    Validation(String),

    /// Configuration errors (settings load/save)
    Config(String),

    /// I/O errors (file read/write, permissions)
    Io(String),

    /// Generic/internal errors that don't fit other categories
    Internal(String),
}

impl AppError {
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error message as a string slice.
    pub fn message(&self) -> &str {
        match self {
            AppError::Clipboard(msg) => msg,
            AppError::Storage(msg) => msg,
            AppError::Validation(msg) => msg,
            AppError::Config(msg) => msg,
            AppError::Io(msg) => msg,
            AppError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => AppError::storage("Record not found in database"),
            diesel::result::Error::DatabaseError(kind, info) => {
                AppError::storage(format!("Database error: {:?}: {}", kind, info.message()))
            }
            _ => AppError::storage(format!("Database error: {}", err)),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::storage(format!("Connection pool error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON error: {}", err))
    }
}

/// Type alias for Result with AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AppError::clipboard("Failed to read clipboard");
        assert!(matches!(err, AppError::Clipboard(_)));
        assert_eq!(err.message(), "Failed to read clipboard");
    }

    #[test]
    fn test_error_display() {
        let err = AppError::storage("Database connection failed");
        let display = format!("{}", err);
        assert!(display.contains("Storage error"));
        assert!(display.contains("Database connection failed"));
    }

    #[test]
    fn test_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("Something went wrong");
        let app_err: AppError = anyhow_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn test_from_diesel_not_found() {
        let diesel_err = diesel::result::Error::NotFound;
        let app_err: AppError = diesel_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));
        assert!(app_err.message().contains("not found"));
    }
}

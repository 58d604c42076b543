//! Error types for ledgerview-core
//!
//! Error codes, severities and user-facing suggestions for the sync and
//! snapshot operations. Malformed rows, numbers and dates are never errors;
//! they resolve to defaults inside the pipeline.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No snapshot loaded yet
    NotLoaded,
    /// Export parsed to zero entries
    EmptyInput,
    /// Every source candidate failed
    SourceUnavailable,
    /// Snapshot could not be read or written
    StorageError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::EmptyInput => write!(f, "EMPTY_INPUT"),
            ErrorCode::SourceUnavailable => write!(f, "SOURCE_UNAVAILABLE"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
        }
    }
}

/// Detailed error information shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nTroubleshooting:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for ledgerview-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No ledger data loaded")]
    NotLoaded,

    #[error("No data found in CSV file")]
    EmptyInput,

    #[error("All sync methods failed ({} tried)", .attempts.len())]
    SourceUnavailable { attempts: Vec<String> },

    #[error("Snapshot storage error: {message}")]
    StorageError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::EmptyInput => ErrorCode::EmptyInput,
            CoreError::SourceUnavailable { .. } => ErrorCode::SourceUnavailable,
            CoreError::StorageError { .. } => ErrorCode::StorageError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Info,
            CoreError::EmptyInput => ErrorSeverity::Error,
            CoreError::SourceUnavailable { .. } => ErrorSeverity::Error,
            CoreError::StorageError { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded => {
                details = details.with_suggestion(
                    "Run with --sync to fetch the ledger export.".to_string()
                );
            }
            CoreError::EmptyInput => {
                details = details.with_suggestion(
                    "Check that the export has a header row and at least six columns per row.".to_string()
                );
            }
            CoreError::SourceUnavailable { attempts } => {
                details = details.with_detail(serde_json::json!({ "attempts": attempts }));
                details = details.with_suggestion(
                    "Check that the export location is reachable.".to_string()
                );
                details = details.with_suggestion(
                    "Make sure the file is accessible.".to_string()
                );
                details = details.with_suggestion(
                    "Try again in a few seconds.".to_string()
                );
            }
            CoreError::StorageError { message } => {
                details = details.with_detail(serde_json::json!({ "storage_message": message }));
                details = details.with_suggestion(
                    "Check that the snapshot directory is writable.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => log::warn!(
                target: "ledgerview::error",
                "{} - Operation: {} - Context: {}",
                error.to_details(),
                context.operation,
                context.data
            ),
            ErrorSeverity::Error => log::error!(
                target: "ledgerview::error",
                "{} - Operation: {} - Context: {}",
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "ledgerview::error",
            "WARNING: {} - Operation: {} - Context: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
        assert_eq!(ErrorCode::EmptyInput.to_string(), "EMPTY_INPUT");
        assert_eq!(ErrorCode::SourceUnavailable.to_string(), "SOURCE_UNAVAILABLE");
    }

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Info.to_string(), "info");
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Error.to_string(), "error");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::EmptyInput;
        assert_eq!(error.code(), ErrorCode::EmptyInput);
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.to_string(), "No data found in CSV file");

        let error = CoreError::StorageError { message: "disk full".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_source_unavailable_details() {
        let error = CoreError::SourceUnavailable {
            attempts: vec!["a.csv: not found".to_string(), "b.csv: denied".to_string()],
        };
        assert_eq!(error.to_string(), "All sync methods failed (2 tried)");

        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::SourceUnavailable);
        assert_eq!(details.suggestions.len(), 3);
        assert_eq!(details.details.unwrap()["attempts"][1], "b.csv: denied");
    }

    #[test]
    fn test_error_details_display() {
        let details = ErrorDetails::new(ErrorCode::EmptyInput, "No data".to_string())
            .with_suggestion("Check the export".to_string());
        let rendered = details.to_string();
        assert!(rendered.starts_with("[EMPTY_INPUT] No data"));
        assert!(rendered.contains("  - Check the export"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("sync".to_string())
            .with_data("source", serde_json::json!("ledger.csv"));
        assert_eq!(context.operation, "sync");
        assert_eq!(context.data["source"], "ledger.csv");
    }
}

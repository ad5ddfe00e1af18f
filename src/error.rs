//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// A stored line or a user-entered value could not be parsed
    #[error("{}", format_parse(.line, .message))]
    Parse {
        /// 1-based line number in the backing store, if the value came from there
        line: Option<usize>,
        message: String,
    },

    /// Positional identifier outside `[0, len)`
    #[error("No expense with ID {index} (there are {len} expenses)")]
    IndexOutOfRange { index: i64, len: usize },

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn format_parse(line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("Parse error on line {}: {}", line, message),
        None => format!("Parse error: {}", message),
    }
}

impl ExpenseError {
    /// Create a parse error for a user-entered value
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            line: None,
            message: message.into(),
        }
    }

    /// Attach a store line number to a parse error; other errors pass through
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse {
                line: Some(line),
                message,
            },
            other => other,
        }
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is an out-of-range positional identifier
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExpenseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

//! Error types for rollcast.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Value Out Of Range
//!   Reason: second value 60 is outside [6, 54]
//!   Fix: Enter whole numbers between 6 and 54 for both values.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 10,
//!   "category": "validation",
//!   "message": "second value 60 is outside [6, 54]",
//!   "recoverable": true,
//!   "context": { "field": "second", "value": 60 }
//! }
//! ```
//!
//! Running out of data is never an error: analytical functions return a
//! documented degenerate result instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for rollcast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Rejected input values at append time.
    Validation,
    /// Structurally invalid persisted or imported logs.
    Import,
    /// Engine configuration errors.
    Config,
    /// Log store location and integrity errors.
    Store,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Import => write!(f, "import"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Store => write!(f, "store"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for rollcast.
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors (10-19)
    #[error("{field} value {value} is outside [{min}, {max}]")]
    ValueOutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} value {input:?} is not a whole number")]
    NonNumeric { field: String, input: String },

    #[error("{field} value is missing")]
    MissingValue { field: String },

    // Import errors (20-29)
    #[error("malformed log: {0}")]
    MalformedImport(String),

    #[error("duplicate observation id {id} in log")]
    DuplicateId { id: u64 },

    #[error("record {id} is inconsistent: {reason}")]
    InconsistentRecord { id: u64, reason: String },

    #[error("observation id {id} does not follow previous id {previous}")]
    IdOutOfOrder { id: u64, previous: u64 },

    // Config errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    // Store errors (40-49)
    #[error("failed to resolve data dir (set ROLLCAST_DATA or XDG_DATA_HOME)")]
    DataDirUnavailable,

    #[error("log store corrupted: {0}")]
    StoreCorrupted(String),

    #[error("no observation id left after {last}")]
    IdSpaceExhausted { last: u64 },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Validation errors
    /// - 20-29: Import errors
    /// - 30-39: Configuration errors
    /// - 40-49: Store errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::ValueOutOfRange { .. } => 10,
            Error::NonNumeric { .. } => 11,
            Error::MissingValue { .. } => 12,
            Error::MalformedImport(_) => 20,
            Error::DuplicateId { .. } => 21,
            Error::InconsistentRecord { .. } => 22,
            Error::IdOutOfOrder { .. } => 23,
            Error::Config(_) => 30,
            Error::InvalidConfig(_) => 31,
            Error::DataDirUnavailable => 40,
            Error::StoreCorrupted(_) => 41,
            Error::IdSpaceExhausted { .. } => 42,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ValueOutOfRange { .. } | Error::NonNumeric { .. } | Error::MissingValue { .. } => {
                ErrorCategory::Validation
            }

            Error::MalformedImport(_)
            | Error::DuplicateId { .. }
            | Error::InconsistentRecord { .. }
            | Error::IdOutOfOrder { .. } => ErrorCategory::Import,

            Error::Config(_) | Error::InvalidConfig(_) => ErrorCategory::Config,

            Error::DataDirUnavailable
            | Error::StoreCorrupted(_)
            | Error::IdSpaceExhausted { .. } => ErrorCategory::Store,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Whether this is a rejected-input error.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Returns whether this error is potentially recoverable by the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Fix the input and try again
            Error::ValueOutOfRange { .. } => true,
            Error::NonNumeric { .. } => true,
            Error::MissingValue { .. } => true,

            // Fix the file and import again
            Error::MalformedImport(_) => true,
            Error::DuplicateId { .. } => true,
            Error::InconsistentRecord { .. } => true,
            Error::IdOutOfOrder { .. } => true,

            Error::Config(_) => true,
            Error::InvalidConfig(_) => true,

            Error::DataDirUnavailable => true,
            Error::StoreCorrupted(_) => false,
            Error::IdSpaceExhausted { .. } => false,

            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::ValueOutOfRange { .. } => {
                "Enter whole numbers between 6 and 54 for both values."
            }
            Error::NonNumeric { .. } => "Enter whole numbers only, for example 'rollcast add 12 40'.",
            Error::MissingValue { .. } => "Both values of a roll are required.",

            Error::MalformedImport(_) => {
                "The file must be a JSON array of observation records as written by 'rollcast export'."
            }
            Error::DuplicateId { .. } => {
                "Every record needs a distinct id. Remove the duplicated entry and import again."
            }
            Error::InconsistentRecord { .. } => {
                "A record's states or class do not match its values. Re-export from a trusted copy."
            }
            Error::IdOutOfOrder { .. } => {
                "Records must be listed oldest first with increasing ids, as 'rollcast export' writes them."
            }

            Error::Config(_) => "Run 'rollcast config validate' to check the engine configuration.",
            Error::InvalidConfig(_) => {
                "Fix the reported field in engine.json or delete the file to use built-in defaults."
            }

            Error::DataDirUnavailable => {
                "Pass '--data <file>' or set ROLLCAST_DATA to choose where the log is stored."
            }
            Error::StoreCorrupted(_) => {
                "The stored log could not be read. Restore it from an export or move it aside."
            }
            Error::IdSpaceExhausted { .. } => {
                "The log's newest id is the largest possible. Export, renumber the ids and import again."
            }

            Error::Io(_) => "Check disk space and permissions, then retry the operation.",
            Error::Json(_) => "Invalid JSON in file. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::ValueOutOfRange { .. } => "Value Out Of Range",
            Error::NonNumeric { .. } => "Value Not Numeric",
            Error::MissingValue { .. } => "Missing Value",

            Error::MalformedImport(_) => "Malformed Import",
            Error::DuplicateId { .. } => "Duplicate Observation Id",
            Error::InconsistentRecord { .. } => "Inconsistent Record",
            Error::IdOutOfOrder { .. } => "Observation Id Out Of Order",

            Error::Config(_) => "Configuration Error",
            Error::InvalidConfig(_) => "Invalid Engine Configuration",

            Error::DataDirUnavailable => "Data Directory Unavailable",
            Error::StoreCorrupted(_) => "Log Store Corrupted",
            Error::IdSpaceExhausted { .. } => "Observation Ids Exhausted",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }

    /// Format for a human reader: headline, reason, and fix.
    pub fn to_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Human remediation hint.
    pub remediation: String,

    /// Additional structured context (e.g., field, value, id).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::ValueOutOfRange {
                field,
                value,
                min,
                max,
            } => {
                context.insert("field".to_string(), serde_json::json!(field));
                context.insert("value".to_string(), serde_json::json!(value));
                context.insert("min".to_string(), serde_json::json!(min));
                context.insert("max".to_string(), serde_json::json!(max));
            }
            Error::NonNumeric { field, input } => {
                context.insert("field".to_string(), serde_json::json!(field));
                context.insert("input".to_string(), serde_json::json!(input));
            }
            Error::MissingValue { field } => {
                context.insert("field".to_string(), serde_json::json!(field));
            }
            Error::DuplicateId { id } => {
                context.insert("id".to_string(), serde_json::json!(id));
            }
            Error::InconsistentRecord { id, .. } => {
                context.insert("id".to_string(), serde_json::json!(id));
            }
            Error::IdOutOfOrder { id, previous } => {
                context.insert("id".to_string(), serde_json::json!(id));
                context.insert("previous".to_string(), serde_json::json!(previous));
            }
            Error::IdSpaceExhausted { last } => {
                context.insert("last".to_string(), serde_json::json!(last));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            remediation: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

//! # Error Hierarchy
//!
//! Structured error types for the CEX demo stack, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each subsystem defines specific error variants that carry diagnostic
//! context: the operation that failed, the offending input, and actionable
//! information for operators.

use thiserror::Error;

/// Top-level error type for the CEX demo stack.
#[derive(Error, Debug)]
pub enum CexError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot vault read/write failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
///
/// Each primitive enforces format constraints at construction time. These
/// errors carry the invalid input and the expected format so that callers
/// can diagnose bad data without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Month outside 1–12.
    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    /// Day outside 1–31.
    #[error("invalid day: {0} (expected 1-31)")]
    InvalidDay(u32),

    /// Year outside 1900..=current.
    #[error("invalid year: {year} (expected 1900-{max})")]
    InvalidYear {
        /// The rejected year.
        year: i32,
        /// The maximum accepted year (the current UTC year).
        max: i32,
    },

    /// Asset symbol is empty, too long, or contains disallowed characters.
    #[error("invalid asset symbol: \"{0}\" (expected 1-32 chars of A-Z, 0-9, '/', '-')")]
    InvalidSymbol(String),

    /// Amount must be strictly positive.
    #[error("invalid amount: {0} (must be positive and finite)")]
    InvalidAmount(f64),

    /// Timestamp string is not valid UTC ISO 8601.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors from the JSON snapshot vault.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The vault directory could not be created or opened.
    #[error("vault directory unavailable: {path}: {source}")]
    DirUnavailable {
        /// The vault directory path.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing a collection snapshot failed.
    #[error("failed to write snapshot \"{key}\": {source}")]
    WriteFailed {
        /// The collection key.
        key: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading a collection snapshot failed.
    #[error("failed to read snapshot \"{key}\": {source}")]
    ReadFailed {
        /// The collection key.
        key: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A stored snapshot did not deserialize.
    #[error("corrupt snapshot \"{key}\": {source}")]
    Corrupt {
        /// The collection key.
        key: String,
        /// The underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
}

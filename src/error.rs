//! Typed failures that callers need to tell apart from generic I/O or SQLite
//! errors. Everything else travels as `anyhow::Error` with context attached.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A booking pointed at a user or trip row that does not exist.
    #[error("user {user_id} or trip {trip_id} does not exist")]
    MissingReference { user_id: i64, trip_id: i64 },

    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Standard input reached EOF while the shell was waiting for a value.
    #[error("input closed")]
    InputClosed,
}

//! Error types for keydb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using KeyDbError
pub type Result<T> = std::result::Result<T, KeyDbError>;

/// Unified error type for keydb operations
#[derive(Debug, Error)]
pub enum KeyDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    #[error("Read past end of log: offset {offset} + len {len} exceeds log length {log_len}")]
    ReadPastEnd { offset: u64, len: u64, log_len: u64 },

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Index unreadable: {0}")]
    IndexUnreadable(String),

    #[error("Index corrupt: {0}")]
    IndexCorrupt(String),

    #[error("Invalid index range for key {key:?}: [{location}, {end})")]
    InvalidRange { key: String, location: u64, end: u64 },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

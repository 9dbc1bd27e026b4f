//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Storage Client
//!
//! This module defines the comprehensive error enum (`AppError`) used across
//! the entire crate. Each variant carries rich context for diagnostics, and
//! all major modules are expected to use `Result<T, AppError>` for
//! consistency.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all storage client operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Remote storage API rejected the request (`success = false` upstream).
    #[error("Storage operation '{operation}' failed: {message}")]
    Gateway { operation: String, message: String },

    /// Transport-level failure before a remote verdict was reached.
    #[error("Network error: {0}")]
    Network(String),

    /// Input validation errors (client-side, never reach the gateway).
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// A multi-item operation failed after some items already succeeded.
    /// Succeeded items are not rolled back.
    #[error("{operation} failed after {completed}/{total} item(s): {message}")]
    PartialBatch {
        operation: String,
        completed: usize,
        total: usize,
        message: String,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization or deserialization error (e.g., JSON dialog props).
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Session cache failure (poster memoization).
    #[error("Cache error: {0}")]
    Cache(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    #[must_use]
    /// Attach extra context to an error.
    pub fn with_context<S: Into<String>>(self, ctx: S) -> Self {
        Self::Other(format!("{}: {}", ctx.into(), self))
    }

    /// Create a gateway rejection error.
    pub fn gateway<S1: Into<String>, S2: Into<String>>(operation: S1, message: S2) -> Self {
        Self::Gateway {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an input validation error.
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a partial batch failure error.
    pub fn partial_batch<S1, S2>(operation: S1, completed: usize, total: usize, message: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::PartialBatch {
            operation: operation.into(),
            completed,
            total,
            message: message.into(),
        }
    }

    #[must_use]
    /// True for errors that originated on the far side of the gateway seam.
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Gateway { .. } | Self::Network(_))
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e.to_string())
    }
}

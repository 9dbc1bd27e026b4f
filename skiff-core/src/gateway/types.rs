//! src/gateway/types.rs
//! ============================================================================
//! # Gateway Data Model
//!
//! Remote-authoritative snapshot types exchanged with the storage API, plus
//! the gateway-local error type. Listings are replaced wholesale on every
//! refresh; none of these values are ever mutated client-side.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// A named storage backend exposing the common operation set.
///
/// The provider catalog is fetched once and cached for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Backend identifier, e.g. `"local"`, `"alist"`.
    pub storage_type: CompactString,

    /// Declared transfer capability of the backend.
    pub transfer_type: CompactString,
}

/// One entry of a remote listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub storage_type: CompactString,

    /// Absolute path within the provider's namespace.
    pub path: CompactString,

    pub name: CompactString,

    /// Extension with leading dot, empty for directories.
    pub ext: CompactString,

    pub size: u64,

    pub is_dir: bool,

    pub mod_time: DateTime<Utc>,
}

/// Mode selector for the generalized transfer endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl TransferMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

/// Upload payload: the client-side stand-in for a browser `File` object.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub name: CompactString,
    pub bytes: bytes::Bytes,
}

impl UploadSource {
    pub fn new(name: impl Into<CompactString>, bytes: impl Into<bytes::Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Well-typed upload progress contract: `(bytes_done, bytes_total)`.
///
/// Deliberately independent of any HTTP client's progress event shape.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Failures crossing the gateway seam.
///
/// The transport collaborator unwraps the `{success, message, data}`
/// envelope upstream: a `success = false` verdict arrives here as
/// [`GatewayError::Rejected`], anything below that as
/// [`GatewayError::Network`].
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Remote API processed the request and said no.
    #[error("{message}")]
    Rejected { message: String },

    /// The request never produced a remote verdict.
    #[error("network error: {message}")]
    Network { message: String },
}

impl GatewayError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Human-readable message for notification surfaces.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message } | Self::Network { message } => message,
        }
    }

    /// Promote to the crate error, tagging the failed operation.
    #[must_use]
    pub fn into_app_error(self, operation: &str) -> AppError {
        match self {
            Self::Rejected { message } => AppError::gateway(operation, message),
            Self::Network { message } => AppError::Network(message),
        }
    }
}

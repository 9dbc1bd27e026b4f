//! lib.rs — Main Library Entry for the Storage Orchestration Client
//! -----------------------------------------------
//! Explicitly exposes the error, config, gateway, model, ops, media, and
//! util modules. Only re-export what you want public in the library crate
//! root.

/// --- Error handling (unified error type for the crate) ---
pub mod error;

/// --- Configuration: API endpoint, notifications, caches ---
pub mod config;

/// --- Gateway seams: remote storage and media backends ---
pub mod gateway {
    pub mod media;
    pub mod memory;
    pub mod storage;
    pub mod types;
}

/// --- State/data models (navigation, dialogs, notifications) ---
pub mod model {
    pub mod context;
    pub mod dialog;
    pub mod messages;
    pub mod nav;
}

/// --- Mutating file operations against the gateway ---
pub mod ops {
    pub mod coordinator;
    pub mod progress;
}

/// --- Media title recognition (secondary feature) ---
pub mod media {
    pub mod recognizer;
}

/// --- Utilities: path joining, humanized formatting, icons ---
pub mod util {
    pub mod humanize;
    pub mod icons;
    pub mod paths;
}

pub mod logging;
pub use logging::Logger;

/// --- Crate-level re-exports for the most important types ---
pub use config::Config;
pub use error::AppError;
pub use gateway::media::{MediaGateway, MediaItem, TmdbGateway};
pub use gateway::memory::MemoryGateway;
pub use gateway::storage::{FileSaver, StorageGateway};
pub use gateway::types::{FileEntry, GatewayError, Provider, TransferMode, UploadSource};
pub use media::recognizer::{MediaRecognizer, RecognitionState};
pub use model::context::AppContext;
pub use model::dialog::{DialogHandlers, DialogRegistry, DialogType};
pub use model::messages::{MessageLevel, Messages};
pub use model::nav::{Breadcrumb, NavigationState};
pub use ops::coordinator::{FileOperationCoordinator, OpOutcome};

//! src/config.rs
//! ============================================================================
//! # Config: Client Configuration Loader and Saver
//!
//! Manages all user-editable settings for the storage client. Loads and
//! saves settings as TOML from the proper cross-platform config path using
//! the [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::media::recognizer::PosterCacheConfig;
use crate::model::messages::MessageTimeouts;

/// Remote API settings. The transport itself lives behind the gateway
/// seam; these values are handed to whichever transport is wired in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storage API.
    pub base_url: String,

    /// Per-request timeout enforced by the transport.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Route copy/move through the generalized transfer endpoint instead
    /// of the dedicated copy/move endpoints.
    pub use_transfer_endpoint: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            request_timeout: Duration::from_secs(10),
            use_transfer_endpoint: false,
        }
    }
}

/// Main configuration struct for the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,

    /// Notification auto-dismiss timeouts per level.
    #[serde(default)]
    pub notifications: MessageTimeouts,

    /// Poster URL memoization settings.
    #[serde(default)]
    pub poster_cache: PosterCacheConfig,
}

impl Config {
    /// Loads config from TOML at the XDG-compliant app config dir, or
    /// returns defaults (writing them out for next time).
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            Self::load_from(&path).await
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Loads config from an explicit TOML file path.
    pub async fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = TokioFs::read_to_string(path).await?;
        let cfg: Self = toml::from_str(&text)?;
        Ok(cfg)
    }

    /// Saves config to TOML at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;
        info!("Saving config to {}", path.display());
        self.save_to(&path).await
    }

    /// Saves config to an explicit TOML file path, creating parent dirs.
    pub async fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str).await?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "skiff", "Skiff")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "skiff", "Skiff")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

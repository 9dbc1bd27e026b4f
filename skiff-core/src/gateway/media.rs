//! src/gateway/media.rs
//! ============================================================================
//! # Media Recognition and Metadata Gateways
//!
//! Contracts to the media-title recognition backend and the TMDB metadata
//! proxy. Both are external collaborators; the recognizer module drives
//! them but never sees their transports.

use async_trait::async_trait;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::gateway::types::GatewayError;

/// Parsed recognition result for one media title.
///
/// A response whose `title` is empty means the backend could not identify
/// the input (distinct from a failed request).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub title: CompactString,
    pub original_title: CompactString,
    pub year: i32,
    /// `"movie"` or `"tv"`.
    pub media_type: CompactString,
    pub part: CompactString,

    pub file_extension: CompactString,

    // External ids
    pub tmdb_id: i64,
    pub imdb_id: CompactString,
    pub tvdb_id: i64,

    // Release metadata
    pub customization: Vec<CompactString>,
    pub release_groups: Vec<CompactString>,
    pub version: i32,
    pub platform: CompactString,
    pub resource_type: CompactString,
    pub resource_effect: Vec<CompactString>,
    pub resource_pix: CompactString,
    pub video_encode: CompactString,
    pub audio_encode: CompactString,

    // Episode data; `-1` season/episode means not applicable
    pub season: i32,
    pub season_str: CompactString,
    pub season_year: i32,
    pub episode: i32,
    pub episode_str: CompactString,
    pub episode_title: CompactString,
    pub episode_date: CompactString,
}

impl MediaItem {
    /// Whether the backend actually identified something.
    #[must_use]
    pub fn is_identified(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Title recognition backend.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Recognize a raw media title into structured metadata.
    async fn recognize(&self, title: &str) -> Result<MediaItem, GatewayError>;
}

/// TMDB metadata proxy (poster art and overview text).
#[async_trait]
pub trait TmdbGateway: Send + Sync {
    /// Poster image URL for `(media_type, tmdb_id)`.
    async fn poster_image(&self, media_type: &str, tmdb_id: i64) -> Result<String, GatewayError>;

    /// Overview/synopsis text for `(media_type, tmdb_id)`.
    async fn overview(&self, media_type: &str, tmdb_id: i64) -> Result<String, GatewayError>;
}

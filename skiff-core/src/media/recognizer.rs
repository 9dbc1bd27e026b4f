//! src/media/recognizer.rs
//! ============================================================================
//! # `MediaRecognizer`: Title Recognition State
//!
//! Drives the media-title recognition backend and the TMDB metadata proxy.
//! Recognition is a four-outcome flow: a validated title either resolves to
//! structured metadata (success), resolves to nothing (not-found), or the
//! request fails (error); idle otherwise. Poster and overview lookups are
//! explicit calls, never hidden side effects of a state change; poster URLs
//! are memoized per `(media_type, tmdb_id)` for the session.

use std::sync::Arc;
use std::time::Duration;

use compact_str::CompactString;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::gateway::media::{MediaGateway, MediaItem, TmdbGateway};

/// Recognition flow states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecognitionState {
    #[default]
    Idle,
    Loading,
    Success,
    NotFound,
    Error,
}

/// Settled result of one `recognize` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOutcome {
    pub state: RecognitionState,
    pub result: Option<MediaItem>,
    pub error_message: CompactString,
}

/// Poster URL memoization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterCacheConfig {
    pub max_capacity: u64,

    #[serde(with = "humantime_serde")]
    pub ttl: Duration,

    #[serde(with = "humantime_serde")]
    pub tti: Duration,
}

impl Default for PosterCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 256,
            ttl: Duration::from_secs(1800),
            tti: Duration::from_secs(600),
        }
    }
}

/// Session recognition state over the media gateways.
pub struct MediaRecognizer {
    media: Arc<dyn MediaGateway>,
    tmdb: Arc<dyn TmdbGateway>,

    /// Editable title field backing the recognition dialog.
    pub title: CompactString,

    loading: bool,
    result: Option<MediaItem>,
    error_message: CompactString,

    poster_cache: Cache<(CompactString, i64), String>,
}

impl MediaRecognizer {
    #[must_use]
    pub fn new(
        media: Arc<dyn MediaGateway>,
        tmdb: Arc<dyn TmdbGateway>,
        cache: &PosterCacheConfig,
    ) -> Self {
        Self {
            media,
            tmdb,
            title: CompactString::default(),
            loading: false,
            result: None,
            error_message: CompactString::default(),
            poster_cache: Cache::builder()
                .max_capacity(cache.max_capacity)
                .time_to_live(cache.ttl)
                .time_to_idle(cache.tti)
                .build(),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn result(&self) -> Option<&MediaItem> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Whether a result or an error is available for display.
    #[must_use]
    pub fn has_result_or_error(&self) -> bool {
        self.result.is_some() || !self.error_message.is_empty()
    }

    /// Reset all recognition state, including the title field.
    pub fn reset_state(&mut self) {
        self.title = CompactString::default();
        self.result = None;
        self.error_message = CompactString::default();
    }

    /// Clear result and error but keep the typed title.
    pub fn clear_result(&mut self) {
        self.result = None;
        self.error_message = CompactString::default();
    }

    /// Recognize `title`, falling back to the stored title field.
    ///
    /// An empty (post-trim) title is rejected client-side with an inline
    /// validation message and never reaches the gateway.
    #[instrument(level = "info", skip(self, title))]
    pub async fn recognize(&mut self, title: Option<&str>) -> RecognitionOutcome {
        let candidate = title.unwrap_or(self.title.as_str()).trim().to_owned();

        if candidate.is_empty() {
            let message: CompactString = "Please enter a media title".into();
            self.result = None;
            self.error_message = message.clone();
            return RecognitionOutcome {
                state: RecognitionState::Error,
                result: None,
                error_message: message,
            };
        }

        self.loading = true;
        self.error_message = CompactString::default();
        self.result = None;

        let outcome = match self.media.recognize(&candidate).await {
            Ok(item) if item.is_identified() => {
                info!(title = %item.title, tmdb_id = item.tmdb_id, "media recognized");
                self.result = Some(item.clone());
                RecognitionOutcome {
                    state: RecognitionState::Success,
                    result: Some(item),
                    error_message: CompactString::default(),
                }
            }
            Ok(_) => {
                debug!(%candidate, "no match for title");
                RecognitionOutcome {
                    state: RecognitionState::NotFound,
                    result: None,
                    error_message: CompactString::default(),
                }
            }
            Err(err) => {
                warn!(error = %err, "media recognition failed");
                let message: CompactString = err.message().into();
                self.error_message = message.clone();
                RecognitionOutcome {
                    state: RecognitionState::Error,
                    result: None,
                    error_message: message,
                }
            }
        };

        self.loading = false;
        outcome
    }

    /// Poster URL for a recognized item, memoized for the session.
    pub async fn fetch_poster(&self, item: &MediaItem) -> Result<String, AppError> {
        let key = (item.media_type.clone(), item.tmdb_id);
        let tmdb = Arc::clone(&self.tmdb);
        let (media_type, tmdb_id) = (item.media_type.clone(), item.tmdb_id);

        self.poster_cache
            .try_get_with(key, async move {
                tmdb.poster_image(&media_type, tmdb_id).await
            })
            .await
            .map_err(|err| AppError::gateway("poster_image", err.message()))
    }

    /// Overview text for a recognized item.
    pub async fn fetch_overview(&self, item: &MediaItem) -> Result<String, AppError> {
        self.tmdb
            .overview(&item.media_type, item.tmdb_id)
            .await
            .map_err(|err| err.into_app_error("overview"))
    }
}

/// Display text for a media type tag.
#[must_use]
pub fn media_type_text(media_type: &str) -> CompactString {
    match media_type {
        "1" | "movie" => "Movie".into(),
        "2" | "tv" | "series" => "TV Series".into(),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::types::GatewayError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted recognition backend: next response plus a call counter.
    #[derive(Default)]
    struct ScriptedMedia {
        response: Mutex<Option<Result<MediaItem, GatewayError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedMedia {
        fn respond_with(&self, response: Result<MediaItem, GatewayError>) {
            *self.response.lock() = Some(response);
        }
    }

    #[async_trait]
    impl MediaGateway for ScriptedMedia {
        async fn recognize(&self, _title: &str) -> Result<MediaItem, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .lock()
                .take()
                .unwrap_or_else(|| Ok(MediaItem::default()))
        }
    }

    #[derive(Default)]
    struct CountingTmdb {
        poster_calls: AtomicUsize,
    }

    #[async_trait]
    impl TmdbGateway for CountingTmdb {
        async fn poster_image(
            &self,
            media_type: &str,
            tmdb_id: i64,
        ) -> Result<String, GatewayError> {
            self.poster_calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("https://img.test/{media_type}/{tmdb_id}.jpg"))
        }

        async fn overview(&self, _media_type: &str, _tmdb_id: i64) -> Result<String, GatewayError> {
            Ok("An overview.".to_string())
        }
    }

    fn recognizer(media: Arc<ScriptedMedia>, tmdb: Arc<CountingTmdb>) -> MediaRecognizer {
        MediaRecognizer::new(media, tmdb, &PosterCacheConfig::default())
    }

    fn identified(title: &str) -> MediaItem {
        MediaItem {
            title: title.into(),
            media_type: "movie".into(),
            tmdb_id: 42,
            ..MediaItem::default()
        }
    }

    #[tokio::test]
    async fn test_empty_title_is_rejected_client_side() {
        let media = Arc::new(ScriptedMedia::default());
        let mut rec = recognizer(Arc::clone(&media), Arc::new(CountingTmdb::default()));

        let outcome = rec.recognize(Some("   ")).await;
        assert_eq!(outcome.state, RecognitionState::Error);
        assert_eq!(outcome.error_message, "Please enter a media title");
        assert_eq!(media.calls.load(Ordering::SeqCst), 0);
        assert!(rec.has_result_or_error());
    }

    #[tokio::test]
    async fn test_success_stores_result() {
        let media = Arc::new(ScriptedMedia::default());
        media.respond_with(Ok(identified("Dune")));
        let mut rec = recognizer(Arc::clone(&media), Arc::new(CountingTmdb::default()));

        let outcome = rec.recognize(Some("Dune.2021.2160p")).await;
        assert_eq!(outcome.state, RecognitionState::Success);
        assert_eq!(rec.result().unwrap().title, "Dune");
        assert!(!rec.is_loading());
    }

    #[tokio::test]
    async fn test_unidentified_response_is_not_found() {
        let media = Arc::new(ScriptedMedia::default());
        media.respond_with(Ok(MediaItem::default()));
        let mut rec = recognizer(Arc::clone(&media), Arc::new(CountingTmdb::default()));

        let outcome = rec.recognize(Some("garbled")).await;
        assert_eq!(outcome.state, RecognitionState::NotFound);
        assert!(outcome.result.is_none());
        assert!(outcome.error_message.is_empty());
        assert!(!rec.has_result_or_error());
    }

    #[tokio::test]
    async fn test_gateway_error_message_is_extracted() {
        let media = Arc::new(ScriptedMedia::default());
        media.respond_with(Err(GatewayError::rejected("backend offline")));
        let mut rec = recognizer(Arc::clone(&media), Arc::new(CountingTmdb::default()));

        let outcome = rec.recognize(Some("Dune")).await;
        assert_eq!(outcome.state, RecognitionState::Error);
        assert_eq!(outcome.error_message, "backend offline");
        assert!(!rec.is_loading());
    }

    #[tokio::test]
    async fn test_recognize_falls_back_to_stored_title() {
        let media = Arc::new(ScriptedMedia::default());
        media.respond_with(Ok(identified("Dune")));
        let mut rec = recognizer(Arc::clone(&media), Arc::new(CountingTmdb::default()));

        rec.title = "Dune.2021".into();
        let outcome = rec.recognize(None).await;
        assert_eq!(outcome.state, RecognitionState::Success);
    }

    #[tokio::test]
    async fn test_poster_fetch_is_memoized() {
        let tmdb = Arc::new(CountingTmdb::default());
        let rec = recognizer(Arc::new(ScriptedMedia::default()), Arc::clone(&tmdb));
        let item = identified("Dune");

        let first = rec.fetch_poster(&item).await.unwrap();
        let second = rec.fetch_poster(&item).await.unwrap();

        assert_eq!(first, "https://img.test/movie/42.jpg");
        assert_eq!(first, second);
        assert_eq!(tmdb.poster_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_title_and_result() {
        let media = Arc::new(ScriptedMedia::default());
        media.respond_with(Ok(identified("Dune")));
        let mut rec = recognizer(Arc::clone(&media), Arc::new(CountingTmdb::default()));

        rec.title = "Dune".into();
        rec.recognize(None).await;
        rec.reset_state();

        assert!(rec.title.is_empty());
        assert!(!rec.has_result_or_error());
    }

    #[test]
    fn test_media_type_text_mapping() {
        assert_eq!(media_type_text("movie"), "Movie");
        assert_eq!(media_type_text("1"), "Movie");
        assert_eq!(media_type_text("tv"), "TV Series");
        assert_eq!(media_type_text("documentary"), "documentary");
    }
}

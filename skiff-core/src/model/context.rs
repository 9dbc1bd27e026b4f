//! src/model/context.rs
//! ============================================================================
//! # `AppContext`: Constructed Session Singletons
//!
//! Holds the handles that are process-wide by design: configuration, the
//! gateway seams, the notification slot, and the dialog registry. Built
//! once at process start and passed by reference to whichever components
//! need it; there is no module-level mutable state anywhere in the crate.

use std::sync::Arc;

use crate::config::Config;
use crate::gateway::media::{MediaGateway, TmdbGateway};
use crate::gateway::storage::StorageGateway;
use crate::media::recognizer::MediaRecognizer;
use crate::model::dialog::DialogRegistry;
use crate::model::messages::Messages;
use crate::model::nav::NavigationState;
use crate::ops::coordinator::FileOperationCoordinator;

/// The session's constructed singletons.
pub struct AppContext {
    pub config: Arc<Config>,
    pub storage: Arc<dyn StorageGateway>,
    pub media: Arc<dyn MediaGateway>,
    pub tmdb: Arc<dyn TmdbGateway>,
    pub messages: Messages,
    pub dialogs: DialogRegistry,
}

impl AppContext {
    #[must_use]
    pub fn new(
        config: Config,
        storage: Arc<dyn StorageGateway>,
        media: Arc<dyn MediaGateway>,
        tmdb: Arc<dyn TmdbGateway>,
    ) -> Self {
        let messages = Messages::new(config.notifications);
        Self {
            config: Arc::new(config),
            storage,
            media,
            tmdb,
            messages,
            dialogs: DialogRegistry::new(),
        }
    }

    /// Fresh navigation state wired to the session's gateway and messages.
    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        NavigationState::new(Arc::clone(&self.storage), self.messages.clone())
    }

    /// Fresh operation coordinator honoring the configured endpoint routing.
    #[must_use]
    pub fn file_operations(&self) -> FileOperationCoordinator {
        FileOperationCoordinator::new(Arc::clone(&self.storage), self.messages.clone())
            .use_transfer_endpoint(self.config.api.use_transfer_endpoint)
    }

    /// Fresh media recognizer with the session's poster cache settings.
    #[must_use]
    pub fn media_recognizer(&self) -> MediaRecognizer {
        MediaRecognizer::new(
            Arc::clone(&self.media),
            Arc::clone(&self.tmdb),
            &self.config.poster_cache,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::gateway::media::MediaItem;
    use crate::gateway::types::{GatewayError, Provider};
    use async_trait::async_trait;

    struct NullMedia;

    #[async_trait]
    impl MediaGateway for NullMedia {
        async fn recognize(&self, _title: &str) -> Result<MediaItem, GatewayError> {
            Ok(MediaItem::default())
        }
    }

    #[async_trait]
    impl TmdbGateway for NullMedia {
        async fn poster_image(
            &self,
            _media_type: &str,
            _tmdb_id: i64,
        ) -> Result<String, GatewayError> {
            Ok(String::new())
        }

        async fn overview(&self, _media_type: &str, _tmdb_id: i64) -> Result<String, GatewayError> {
            Ok(String::new())
        }
    }

    fn context() -> AppContext {
        let storage = Arc::new(MemoryGateway::with_providers(vec![Provider {
            storage_type: "local".into(),
            transfer_type: "copy".into(),
        }]));
        AppContext::new(
            Config::default(),
            storage,
            Arc::new(NullMedia),
            Arc::new(NullMedia),
        )
    }

    #[tokio::test]
    async fn test_components_share_the_message_slot() {
        let ctx = context();
        let mut nav = ctx.navigation();
        nav.load_providers().await;

        ctx.messages.success("hello");
        assert_eq!(ctx.messages.current().unwrap().text, "hello");
    }

    #[tokio::test]
    async fn test_navigation_sees_seeded_gateway_state() {
        let ctx = context();
        let mut nav = ctx.navigation();
        nav.load_providers().await;

        assert_eq!(nav.current_provider(), "local");

        let mut ops = ctx.file_operations();
        ops.new_folder.name = "new".into();
        ops.create_folder(&mut nav).await;
        assert!(nav.files().iter().any(|e| e.name == "new"));
    }
}

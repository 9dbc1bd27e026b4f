//! src/model/nav.rs
//! ============================================================================
//! # `NavigationState`: Provider/Path State and Listing Ownership
//!
//! Owns the provider catalog, the current `(provider, path)` pair, and the
//! file listing for that pair. The listing is remote-authoritative: a
//! refresh replaces it wholesale, never patches it, so readers observe
//! either the old list or the new one. Gateway failures surface through
//! [`Messages`] and leave prior state intact apart from the `loading`
//! flag, which clears on every exit path.

use std::sync::Arc;

use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, info, instrument, warn};

use crate::gateway::storage::StorageGateway;
use crate::gateway::types::{FileEntry, Provider};
use crate::model::messages::Messages;
use crate::util::paths;

/// One element of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub title: CompactString,
    /// Cumulative absolute path prefix.
    pub href: CompactString,
    /// The current location is rendered but not navigable.
    pub disabled: bool,
}

/// Breadcrumb trail for an absolute path: root first, cumulative prefixes,
/// final element disabled. `"/"` yields exactly the (disabled) root entry.
#[must_use]
pub fn breadcrumbs_for(path: &str) -> SmallVec<[Breadcrumb; 8]> {
    let mut items: SmallVec<[Breadcrumb; 8]> = smallvec![Breadcrumb {
        title: "Root".into(),
        href: "/".into(),
        disabled: false,
    }];

    let mut href = String::new();
    for part in paths::segments(path) {
        href.push('/');
        href.push_str(part);
        items.push(Breadcrumb {
            title: part.into(),
            href: href.as_str().into(),
            disabled: false,
        });
    }

    if let Some(last) = items.last_mut() {
        last.disabled = true;
    }

    items
}

/// Session navigation state over the remote storage API.
pub struct NavigationState {
    gateway: Arc<dyn StorageGateway>,
    messages: Messages,

    providers: Vec<Provider>,
    current_provider: CompactString,
    current_path: CompactString,

    /// Listing for `(current_provider, current_path)`, replaced wholesale.
    files: Vec<FileEntry>,

    /// True for the duration of a listing call.
    loading: bool,
}

impl NavigationState {
    #[must_use]
    pub fn new(gateway: Arc<dyn StorageGateway>, messages: Messages) -> Self {
        Self {
            gateway,
            messages,
            providers: Vec::new(),
            current_provider: CompactString::default(),
            current_path: "/".into(),
            files: Vec::new(),
            loading: false,
        }
    }

    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    #[must_use]
    pub fn current_provider(&self) -> &str {
        &self.current_provider
    }

    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Breadcrumb trail for the current path.
    #[must_use]
    pub fn breadcrumbs(&self) -> SmallVec<[Breadcrumb; 8]> {
        breadcrumbs_for(&self.current_path)
    }

    /// Fetch the provider catalog once per session; on success select the
    /// first provider and load its root listing. Failures are surfaced via
    /// notification and do not corrupt state.
    #[instrument(level = "info", skip(self))]
    pub async fn load_providers(&mut self) {
        if !self.providers.is_empty() {
            debug!("provider catalog already loaded, skipping");
            return;
        }

        match self.gateway.provider_list().await {
            Ok(providers) => {
                info!(count = providers.len(), "provider catalog loaded");
                self.providers = providers;
                if let Some(first) = self.providers.first() {
                    self.current_provider = first.storage_type.clone();
                    self.load_files().await;
                }
            }
            Err(err) => {
                warn!(error = %err, "provider catalog fetch failed");
                self.messages
                    .surface("Failed to load storage providers", &err.into_app_error("provider_list"));
            }
        }
    }

    /// Fetch the listing for the current `(provider, path)` pair and
    /// replace `files` atomically. `loading` clears on every exit path.
    #[instrument(level = "info", skip(self), fields(provider = %self.current_provider, path = %self.current_path))]
    pub async fn load_files(&mut self) {
        if self.current_provider.is_empty() {
            return;
        }

        self.loading = true;
        match self
            .gateway
            .list(&self.current_provider, &self.current_path)
            .await
        {
            Ok(files) => {
                debug!(count = files.len(), "listing replaced");
                self.files = files;
            }
            Err(err) => {
                warn!(error = %err, "listing fetch failed");
                self.messages
                    .surface("Failed to load file listing", &err.into_app_error("list"));
            }
        }
        self.loading = false;
    }

    /// Switch to another provider: the path always resets to `/` since
    /// paths are meaningless across provider namespaces.
    pub async fn change_provider(&mut self, storage_type: impl Into<CompactString>) {
        self.current_provider = storage_type.into();
        self.current_path = "/".into();
        self.load_files().await;
    }

    /// Navigate to an absolute path and reload. Navigating to the current
    /// path is a valid refresh.
    pub async fn navigate_to(&mut self, path: impl Into<CompactString>) {
        let path = path.into();
        if !paths::is_absolute(&path) {
            warn!(%path, "ignoring navigation to non-absolute path");
            return;
        }
        self.current_path = path;
        self.load_files().await;
    }

    /// Row activation: descend into directories; files are handled by
    /// other surfaces (download/preview) and are a no-op here.
    pub async fn on_row_click(&mut self, entry: &FileEntry) {
        if entry.is_dir {
            self.navigate_to(entry.path.clone()).await;
        }
    }
}

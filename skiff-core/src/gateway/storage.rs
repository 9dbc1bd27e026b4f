//! src/gateway/storage.rs
//! ============================================================================
//! # `StorageGateway`: Typed Contract to the Remote Storage API
//!
//! One async method per remote endpoint. Implementations own the transport
//! and the response-envelope unwrapping; this trait only fixes the
//! request/response shapes the orchestration layer relies on.

use async_trait::async_trait;
use bytes::Bytes;

use crate::gateway::types::{FileEntry, GatewayError, Provider, ProgressFn, TransferMode};

/// Result alias local to the gateway seam.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Request/response contract to the remote storage API.
///
/// All paths are absolute within the named provider's namespace. Mutating
/// endpoints return the remote's snapshot of the affected entry; callers
/// must re-list to observe the full effect.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Provider catalog. Fetched once per session by the navigation layer.
    async fn provider_list(&self) -> GatewayResult<Vec<Provider>>;

    /// Whether `path` exists on `provider`.
    async fn check_exists(&self, provider: &str, path: &str) -> GatewayResult<bool>;

    /// Full listing at `(provider, path)`.
    async fn list(&self, provider: &str, path: &str) -> GatewayResult<Vec<FileEntry>>;

    /// Create a directory at `path`.
    async fn mkdir(&self, provider: &str, path: &str) -> GatewayResult<FileEntry>;

    /// Delete the entry at `path`.
    async fn delete(&self, provider: &str, path: &str) -> GatewayResult<FileEntry>;

    /// Duplicate `src` to `dest`, preserving the source.
    async fn copy(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry>;

    /// Relocate `src` to `dest`; the source ceases to exist.
    async fn move_to(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry>;

    /// Hard-link `src` at `dest` (same-provider only, remote-enforced).
    async fn link(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry>;

    /// Symlink `src` at `dest` (same-provider only, remote-enforced).
    async fn soft_link(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry>;

    /// Generalized single endpoint covering copy and move.
    ///
    /// The remote API exposes this independently of [`copy`](Self::copy) and
    /// [`move_to`](Self::move_to); both paths stay available to clients.
    async fn transfer(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
        mode: TransferMode,
    ) -> GatewayResult<FileEntry>;

    /// Upload `payload` to `path`, reporting `(bytes_done, bytes_total)`
    /// through `progress` as the transfer advances.
    async fn upload(
        &self,
        provider: &str,
        path: &str,
        payload: Bytes,
        progress: Option<ProgressFn>,
    ) -> GatewayResult<FileEntry>;

    /// Fetch the binary payload at `path`.
    async fn download(&self, provider: &str, path: &str) -> GatewayResult<Bytes>;
}

/// Boundary effect consumed by Download: hands a fetched payload to the
/// platform's own file-save mechanism. Not further specified here.
pub trait FileSaver: Send + Sync {
    fn save(&self, filename: &str, payload: Bytes) -> Result<(), crate::error::AppError>;
}

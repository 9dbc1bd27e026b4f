//! src/ops/coordinator.rs
//! ============================================================================
//! # `FileOperationCoordinator`: Mutating Operations Against the Gateway
//!
//! Executes upload, create-folder, download, copy, move, transfer, and
//! delete. Every operation validates its inputs client-side, is guarded by
//! a per-kind in-flight flag, and on success closes its own dialog, clears
//! its transient request state, and resynchronizes through
//! `NavigationState::load_files`. Failures surface exactly one
//! notification and clear only the failing operation's flag.
//!
//! Copy and move refresh the *current* view even when the destination
//! differs; the destination listing is not shown. Accepted behavior,
//! asserted as such in the tests below.

use std::sync::Arc;

use compact_str::{CompactString, format_compact};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::gateway::storage::{FileSaver, StorageGateway};
use crate::gateway::types::{FileEntry, TransferMode, UploadSource};
use crate::model::messages::Messages;
use crate::model::nav::NavigationState;
use crate::ops::progress::ProgressCell;
use crate::util::paths;

/// Settlement of one coordinator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    /// Gateway accepted and the view was resynchronized.
    Completed,
    /// Client-side validation or re-entrancy guard stopped the operation
    /// before any gateway call.
    Skipped,
    /// Gateway or transport failed; the error was surfaced once.
    Failed,
}

/// Transient upload request: lives from dialog open to settlement.
#[derive(Debug, Default)]
pub struct UploadRequest {
    pub visible: bool,
    pub files: Vec<UploadSource>,
    /// Destination override; empty means the current path.
    pub dest_path: CompactString,
    pub progress: ProgressCell,
    in_flight: bool,
}

/// Transient create-folder request.
#[derive(Debug, Default)]
pub struct CreateFolderRequest {
    pub visible: bool,
    pub name: CompactString,
    in_flight: bool,
}

/// Transient copy/move request (shared shape, one instance per kind).
#[derive(Debug, Default)]
pub struct TransferRequest {
    pub visible: bool,
    pub selected: Option<FileEntry>,
    pub dest_provider: CompactString,
    pub dest_path: CompactString,
    in_flight: bool,
}

impl TransferRequest {
    fn clear(&mut self) {
        self.visible = false;
        self.selected = None;
        self.dest_provider = CompactString::default();
        self.dest_path = CompactString::default();
    }
}

/// Coordinator for mutating file operations.
pub struct FileOperationCoordinator {
    gateway: Arc<dyn StorageGateway>,
    messages: Messages,
    /// Route copy/move through the generalized transfer endpoint instead
    /// of the dedicated ones. Both remote code paths stay supported.
    use_transfer_endpoint: bool,

    pub upload: UploadRequest,
    pub new_folder: CreateFolderRequest,
    pub copy: TransferRequest,
    pub mv: TransferRequest,

    delete_in_flight: bool,
    download_in_flight: bool,
}

impl FileOperationCoordinator {
    #[must_use]
    pub fn new(gateway: Arc<dyn StorageGateway>, messages: Messages) -> Self {
        Self {
            gateway,
            messages,
            use_transfer_endpoint: false,
            upload: UploadRequest::default(),
            new_folder: CreateFolderRequest::default(),
            copy: TransferRequest::default(),
            mv: TransferRequest::default(),
            delete_in_flight: false,
            download_in_flight: false,
        }
    }

    /// Route copy/move through the generalized transfer endpoint.
    #[must_use]
    pub fn use_transfer_endpoint(mut self, enabled: bool) -> Self {
        self.use_transfer_endpoint = enabled;
        self
    }

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------

    pub fn open_upload_dialog(&mut self) {
        self.upload.visible = true;
    }

    /// Abandon the upload request without touching the gateway.
    pub fn cancel_upload(&mut self) {
        self.upload.visible = false;
        self.upload.files.clear();
        self.upload.dest_path = CompactString::default();
        self.upload.progress.reset();
    }

    /// Upload the requested files sequentially, in array order.
    ///
    /// The first failure aborts the remaining files and surfaces exactly
    /// one notification for the batch; files already uploaded stay put.
    #[instrument(level = "info", skip(self, nav), fields(files = self.upload.files.len()))]
    pub async fn upload_files(&mut self, nav: &mut NavigationState) -> OpOutcome {
        if self.upload.files.is_empty() {
            debug!("empty upload request, nothing to do");
            return OpOutcome::Skipped;
        }
        if self.upload.in_flight {
            warn!("upload already in flight, request refused");
            return OpOutcome::Skipped;
        }

        self.upload.in_flight = true;
        self.upload.progress.reset();

        let operation_id = Uuid::new_v4();
        let provider: CompactString = nav.current_provider().into();
        let base: CompactString = if self.upload.dest_path.is_empty() {
            nav.current_path().into()
        } else {
            self.upload.dest_path.clone()
        };

        let total = self.upload.files.len();
        let mut failure: Option<(usize, AppError)> = None;

        for (idx, file) in self.upload.files.iter().enumerate() {
            let target = paths::join_child(&base, &file.name);
            info!(operation_id = %operation_id, %target, "uploading file");

            let result = self
                .gateway
                .upload(
                    &provider,
                    &target,
                    file.bytes.clone(),
                    Some(self.upload.progress.callback()),
                )
                .await;

            if let Err(err) = result {
                failure = Some((idx, err.into_app_error("upload")));
                break;
            }
        }

        self.upload.in_flight = false;

        match failure {
            None => {
                self.messages.success("Files uploaded");
                self.upload.visible = false;
                self.upload.files.clear();
                self.upload.dest_path = CompactString::default();
                self.upload.progress.reset();
                nav.load_files().await;
                OpOutcome::Completed
            }
            Some((0, err)) => {
                self.upload.progress.reset();
                self.messages.surface("File upload failed", &err);
                OpOutcome::Failed
            }
            Some((completed, err)) => {
                self.upload.progress.reset();
                let batch =
                    AppError::partial_batch("File upload", completed, total, err.to_string());
                self.messages.error(format_compact!("{batch}"));
                OpOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Create folder
    // ------------------------------------------------------------------

    pub fn open_create_folder_dialog(&mut self) {
        self.new_folder.visible = true;
    }

    pub fn cancel_create_folder(&mut self) {
        self.new_folder.visible = false;
        self.new_folder.name = CompactString::default();
    }

    /// Create a folder named by the request under the current path.
    /// An empty name never reaches the gateway.
    #[instrument(level = "info", skip(self, nav))]
    pub async fn create_folder(&mut self, nav: &mut NavigationState) -> OpOutcome {
        if self.new_folder.name.is_empty() {
            debug!("empty folder name, nothing to do");
            return OpOutcome::Skipped;
        }
        if self.new_folder.in_flight {
            warn!("create-folder already in flight, request refused");
            return OpOutcome::Skipped;
        }

        self.new_folder.in_flight = true;
        let target = paths::join_child(nav.current_path(), &self.new_folder.name);

        let result = self.gateway.mkdir(nav.current_provider(), &target).await;
        self.new_folder.in_flight = false;

        match result {
            Ok(entry) => {
                info!(path = %entry.path, "folder created");
                self.messages.success("Folder created");
                self.new_folder.visible = false;
                self.new_folder.name = CompactString::default();
                nav.load_files().await;
                OpOutcome::Completed
            }
            Err(err) => {
                self.messages
                    .surface("Folder creation failed", &err.into_app_error("mkdir"));
                OpOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Download
    // ------------------------------------------------------------------

    /// Fetch the entry's payload and hand it to the platform save
    /// mechanism, deriving the filename from the entry when none is given.
    #[instrument(level = "info", skip(self, nav, saver), fields(path = %entry.path))]
    pub async fn download(
        &mut self,
        nav: &NavigationState,
        entry: &FileEntry,
        filename: Option<&str>,
        saver: &dyn FileSaver,
    ) -> OpOutcome {
        if self.download_in_flight {
            warn!("download already in flight, request refused");
            return OpOutcome::Skipped;
        }
        self.download_in_flight = true;

        let result = self
            .gateway
            .download(nav.current_provider(), &entry.path)
            .await;
        self.download_in_flight = false;

        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                self.messages
                    .surface("File download failed", &err.into_app_error("download"));
                return OpOutcome::Failed;
            }
        };

        let derived = if entry.name.is_empty() {
            paths::file_name_of(&entry.path)
        } else {
            entry.name.as_str()
        };
        let filename = filename.unwrap_or(derived);

        match saver.save(filename, payload) {
            Ok(()) => {
                self.messages.success("Download started");
                OpOutcome::Completed
            }
            Err(err) => {
                self.messages.surface("File download failed", &err);
                OpOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Copy / Move / Transfer
    // ------------------------------------------------------------------

    /// Open the copy dialog pre-filled with the source entry's own path
    /// and the current provider as the editable destination defaults.
    pub fn open_copy_dialog(&mut self, nav: &NavigationState, entry: &FileEntry) {
        self.copy.selected = Some(entry.clone());
        self.copy.dest_path = entry.path.clone();
        self.copy.dest_provider = nav.current_provider().into();
        self.copy.visible = true;
    }

    /// Same shape as the copy dialog, for move.
    pub fn open_move_dialog(&mut self, nav: &NavigationState, entry: &FileEntry) {
        self.mv.selected = Some(entry.clone());
        self.mv.dest_path = entry.path.clone();
        self.mv.dest_provider = nav.current_provider().into();
        self.mv.visible = true;
    }

    /// Execute the pending copy request. The source is preserved.
    pub async fn copy_file(&mut self, nav: &mut NavigationState) -> OpOutcome {
        Self::run_transfer(
            &self.gateway,
            &self.messages,
            self.use_transfer_endpoint,
            &mut self.copy,
            nav,
            TransferMode::Copy,
        )
        .await
    }

    /// Execute the pending move request. The source ceases to exist.
    pub async fn move_file(&mut self, nav: &mut NavigationState) -> OpOutcome {
        Self::run_transfer(
            &self.gateway,
            &self.messages,
            self.use_transfer_endpoint,
            &mut self.mv,
            nav,
            TransferMode::Move,
        )
        .await
    }

    async fn run_transfer(
        gateway: &Arc<dyn StorageGateway>,
        messages: &Messages,
        use_transfer_endpoint: bool,
        req: &mut TransferRequest,
        nav: &mut NavigationState,
        mode: TransferMode,
    ) -> OpOutcome {
        let Some(selected) = req.selected.clone() else {
            debug!("no entry selected, nothing to do");
            return OpOutcome::Skipped;
        };
        if req.in_flight {
            warn!(mode = mode.as_str(), "transfer already in flight, request refused");
            return OpOutcome::Skipped;
        }

        req.in_flight = true;
        let operation_id = Uuid::new_v4();
        let src_provider: CompactString = nav.current_provider().into();
        info!(
            operation_id = %operation_id,
            mode = mode.as_str(),
            src = %selected.path,
            dest = %req.dest_path,
            "transferring entry"
        );

        let result = if use_transfer_endpoint {
            gateway
                .transfer(
                    &src_provider,
                    &selected.path,
                    &req.dest_provider,
                    &req.dest_path,
                    mode,
                )
                .await
        } else {
            match mode {
                TransferMode::Copy => {
                    gateway
                        .copy(&src_provider, &selected.path, &req.dest_provider, &req.dest_path)
                        .await
                }
                TransferMode::Move => {
                    gateway
                        .move_to(&src_provider, &selected.path, &req.dest_provider, &req.dest_path)
                        .await
                }
            }
        };
        req.in_flight = false;

        match result {
            Ok(_) => {
                match mode {
                    TransferMode::Copy => messages.success("File copied"),
                    TransferMode::Move => messages.success("File moved"),
                }
                req.clear();
                // Refreshes the current view; a differing destination is
                // not shown until the user navigates there.
                nav.load_files().await;
                OpOutcome::Completed
            }
            Err(err) => {
                let context = match mode {
                    TransferMode::Copy => "File copy failed",
                    TransferMode::Move => "File move failed",
                };
                messages.surface(context, &err.into_app_error(mode.as_str()));
                OpOutcome::Failed
            }
        }
    }

    /// Dialog-less transfer through the generalized endpoint, for callers
    /// that already know source and destination.
    #[instrument(level = "info", skip(self, nav, entry), fields(src = %entry.path, mode = mode.as_str()))]
    pub async fn transfer(
        &mut self,
        nav: &mut NavigationState,
        entry: &FileEntry,
        dest_provider: &str,
        dest_path: &str,
        mode: TransferMode,
    ) -> OpOutcome {
        let req = match mode {
            TransferMode::Copy => &mut self.copy,
            TransferMode::Move => &mut self.mv,
        };
        if req.in_flight {
            warn!("transfer already in flight, request refused");
            return OpOutcome::Skipped;
        }
        req.in_flight = true;

        let result = self
            .gateway
            .transfer(
                nav.current_provider(),
                &entry.path,
                dest_provider,
                dest_path,
                mode,
            )
            .await;

        let req = match mode {
            TransferMode::Copy => &mut self.copy,
            TransferMode::Move => &mut self.mv,
        };
        req.in_flight = false;

        match result {
            Ok(_) => {
                self.messages.success("Transfer complete");
                nav.load_files().await;
                OpOutcome::Completed
            }
            Err(err) => {
                self.messages
                    .surface("Transfer failed", &err.into_app_error("transfer"));
                OpOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete an entry after an explicit confirmation decision. A declined
    /// confirmation makes no gateway call and changes no state.
    #[instrument(level = "info", skip(self, nav, confirm), fields(path = %entry.path))]
    pub async fn delete(
        &mut self,
        nav: &mut NavigationState,
        entry: &FileEntry,
        confirm: impl FnOnce(&FileEntry) -> bool,
    ) -> OpOutcome {
        if !confirm(entry) {
            debug!("deletion declined");
            return OpOutcome::Skipped;
        }
        if self.delete_in_flight {
            warn!("delete already in flight, request refused");
            return OpOutcome::Skipped;
        }

        self.delete_in_flight = true;
        let result = self.gateway.delete(nav.current_provider(), &entry.path).await;
        self.delete_in_flight = false;

        match result {
            Ok(_) => {
                self.messages.success("File deleted");
                nav.load_files().await;
                OpOutcome::Completed
            }
            Err(err) => {
                self.messages
                    .surface("File deletion failed", &err.into_app_error("delete"));
                OpOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::gateway::types::{GatewayError, Provider};
    use bytes::Bytes;
    use parking_lot::Mutex;

    fn providers() -> Vec<Provider> {
        vec![
            Provider {
                storage_type: "local".into(),
                transfer_type: "copy".into(),
            },
            Provider {
                storage_type: "cloud".into(),
                transfer_type: "transfer".into(),
            },
        ]
    }

    struct Fixture {
        gateway: Arc<MemoryGateway>,
        messages: Messages,
        nav: NavigationState,
        coord: FileOperationCoordinator,
    }

    async fn fixture() -> Fixture {
        let gateway = Arc::new(MemoryGateway::with_providers(providers()));
        let messages = Messages::default();
        let mut nav = NavigationState::new(
            Arc::clone(&gateway) as Arc<dyn StorageGateway>,
            messages.clone(),
        );
        nav.load_providers().await;
        let coord = FileOperationCoordinator::new(
            Arc::clone(&gateway) as Arc<dyn StorageGateway>,
            messages.clone(),
        );
        Fixture {
            gateway,
            messages,
            nav,
            coord,
        }
    }

    fn upload_sources(names: &[&str]) -> Vec<UploadSource> {
        names
            .iter()
            .map(|n| UploadSource::new(*n, Bytes::from_static(b"data")))
            .collect()
    }

    #[derive(Default)]
    struct RecordingSaver {
        saved: Mutex<Vec<(String, usize)>>,
    }

    impl FileSaver for RecordingSaver {
        fn save(&self, filename: &str, payload: Bytes) -> Result<(), AppError> {
            self.saved.lock().push((filename.to_string(), payload.len()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_upload_is_sequential_with_joined_targets() {
        let mut fx = fixture().await;
        fx.gateway.seed_dir("local", "/docs");
        fx.nav.navigate_to("/docs").await;

        fx.coord.open_upload_dialog();
        fx.coord.upload.files = upload_sources(&["x.txt", "y.txt"]);

        let outcome = fx.coord.upload_files(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Completed);

        let uploads = fx.gateway.calls_for("upload");
        assert_eq!(uploads, vec!["upload local /docs/x.txt", "upload local /docs/y.txt"]);

        // Dialog closed, request destroyed, view resynchronized.
        assert!(!fx.coord.upload.visible);
        assert!(fx.coord.upload.files.is_empty());
        assert!(fx.nav.files().iter().any(|e| e.name == "x.txt"));
    }

    #[tokio::test]
    async fn test_upload_aborts_on_first_failure_with_one_notification() {
        let mut fx = fixture().await;
        fx.gateway
            .inject_failure("upload", GatewayError::rejected("quota exceeded"));

        fx.coord.open_upload_dialog();
        fx.coord.upload.files = upload_sources(&["x.txt", "y.txt"]);

        let before = fx.messages.shown_count();
        let outcome = fx.coord.upload_files(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Failed);

        // Second file never attempted, exactly one notification shown.
        assert_eq!(fx.gateway.calls_for("upload").len(), 1);
        assert_eq!(fx.messages.shown_count(), before + 1);

        // Dialog stays open for retry; the in-flight flag is not stuck.
        assert!(fx.coord.upload.visible);
        assert!(!fx.coord.upload.in_flight);
    }

    #[tokio::test]
    async fn test_upload_partial_failure_keeps_completed_files() {
        let mut fx = fixture().await;
        fx.gateway
            .inject_failure_after("upload", 1, GatewayError::rejected("disk full"));

        fx.coord.open_upload_dialog();
        fx.coord.upload.files = upload_sources(&["x.txt", "y.txt", "z.txt"]);

        let before = fx.messages.shown_count();
        let outcome = fx.coord.upload_files(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Failed);

        // One success, one failure, third never attempted; no rollback.
        assert_eq!(fx.gateway.calls_for("upload").len(), 2);
        assert!(fx.gateway.check_exists("local", "/x.txt").await.unwrap());

        // One batch notification naming the partial completion.
        assert_eq!(fx.messages.shown_count(), before + 1);
        let text = fx.messages.current().unwrap().text;
        assert!(text.contains("1/3"), "unexpected message: {text}");
    }

    #[tokio::test]
    async fn test_upload_empty_list_is_noop() {
        let mut fx = fixture().await;
        fx.coord.open_upload_dialog();

        let outcome = fx.coord.upload_files(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Skipped);
        assert!(fx.gateway.calls_for("upload").is_empty());
        // The dialog is not closed by a no-op.
        assert!(fx.coord.upload.visible);
    }

    #[tokio::test]
    async fn test_upload_respects_dest_override_without_double_slash() {
        let mut fx = fixture().await;
        fx.coord.upload.files = upload_sources(&["x.txt"]);
        fx.coord.upload.dest_path = "/uploads/".into();

        fx.coord.upload_files(&mut fx.nav).await;
        assert_eq!(fx.gateway.calls_for("upload"), vec!["upload local /uploads/x.txt"]);
    }

    #[tokio::test]
    async fn test_upload_reentrancy_guard_refuses_second_request() {
        let mut fx = fixture().await;
        fx.coord.upload.files = upload_sources(&["x.txt"]);
        fx.coord.upload.in_flight = true;

        let outcome = fx.coord.upload_files(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Skipped);
        assert!(fx.gateway.calls_for("upload").is_empty());
    }

    #[tokio::test]
    async fn test_upload_progress_resets_on_settlement() {
        let mut fx = fixture().await;
        fx.coord.upload.files = upload_sources(&["x.txt"]);

        fx.coord.upload_files(&mut fx.nav).await;
        // The cell peaked during the transfer and resets once settled.
        assert_eq!(fx.coord.upload.progress.percent(), 0);
    }

    #[tokio::test]
    async fn test_create_folder_empty_name_makes_no_calls() {
        let mut fx = fixture().await;
        fx.coord.open_create_folder_dialog();

        let outcome = fx.coord.create_folder(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Skipped);
        assert!(fx.gateway.calls_for("mkdir").is_empty());
        assert_eq!(fx.messages.shown_count(), 0);
    }

    #[tokio::test]
    async fn test_create_folder_refresh_shows_new_entry() {
        let mut fx = fixture().await;
        fx.coord.open_create_folder_dialog();
        fx.coord.new_folder.name = "new".into();

        let outcome = fx.coord.create_folder(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Completed);

        // Refresh-after-mutate: the fresh listing includes the folder.
        assert!(fx.nav.files().iter().any(|e| e.name == "new" && e.is_dir));
        assert!(!fx.coord.new_folder.visible);
        assert!(fx.coord.new_folder.name.is_empty());
    }

    #[tokio::test]
    async fn test_create_folder_failure_keeps_name_for_retry() {
        let mut fx = fixture().await;
        fx.gateway
            .inject_failure("mkdir", GatewayError::rejected("denied"));
        fx.coord.new_folder.name = "new".into();

        let outcome = fx.coord.create_folder(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Failed);
        assert_eq!(fx.coord.new_folder.name, "new");
        assert!(!fx.coord.new_folder.in_flight);
    }

    #[tokio::test]
    async fn test_copy_dialog_prefills_source_as_destination() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;

        let entry = fx.nav.files()[0].clone();
        fx.coord.open_copy_dialog(&fx.nav, &entry);

        assert!(fx.coord.copy.visible);
        assert_eq!(fx.coord.copy.dest_path, entry.path);
        assert_eq!(fx.coord.copy.dest_provider, "local");
    }

    #[tokio::test]
    async fn test_copy_preserves_source_and_refreshes_current_view_only() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.gateway.seed_dir("local", "/archive");
        fx.nav.load_files().await;

        let entry = fx.nav.files().iter().find(|e| !e.is_dir).cloned().unwrap();
        fx.coord.open_copy_dialog(&fx.nav, &entry);
        fx.coord.copy.dest_path = "/archive/a.txt".into();
        fx.gateway.clear_calls();

        let outcome = fx.coord.copy_file(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Completed);

        assert!(fx.gateway.check_exists("local", "/a.txt").await.unwrap());
        assert!(fx.gateway.check_exists("local", "/archive/a.txt").await.unwrap());

        // Known limitation: only the current view refreshes; the copy is
        // not visible in it because the destination differs.
        assert_eq!(fx.gateway.calls_for("list"), vec!["list local /"]);
        assert!(!fx.nav.files().iter().any(|e| e.path == "/archive/a.txt"));
        assert!(!fx.coord.copy.visible);
    }

    #[tokio::test]
    async fn test_move_removes_source() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;

        let entry = fx.nav.files()[0].clone();
        fx.coord.open_move_dialog(&fx.nav, &entry);
        fx.coord.mv.dest_path = "/b.txt".into();

        let outcome = fx.coord.move_file(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Completed);

        assert!(!fx.gateway.check_exists("local", "/a.txt").await.unwrap());
        assert!(fx.nav.files().iter().any(|e| e.path == "/b.txt"));
    }

    #[tokio::test]
    async fn test_copy_without_selection_is_noop() {
        let mut fx = fixture().await;
        let outcome = fx.coord.copy_file(&mut fx.nav).await;
        assert_eq!(outcome, OpOutcome::Skipped);
        assert!(fx.gateway.calls_for("copy").is_empty());
    }

    #[tokio::test]
    async fn test_transfer_endpoint_routing_is_configurable() {
        // Default: dedicated endpoints.
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;
        let entry = fx.nav.files()[0].clone();

        fx.coord.open_copy_dialog(&fx.nav, &entry);
        fx.coord.copy.dest_path = "/b.txt".into();
        fx.coord.copy_file(&mut fx.nav).await;
        assert_eq!(fx.gateway.calls_for("copy").len(), 1);
        assert!(fx.gateway.calls_for("transfer").is_empty());

        // Opted in: the generalized endpoint carries the same request.
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;
        let entry = fx.nav.files()[0].clone();

        fx.coord = FileOperationCoordinator::new(
            Arc::clone(&fx.gateway) as Arc<dyn StorageGateway>,
            fx.messages.clone(),
        )
        .use_transfer_endpoint(true);

        fx.coord.open_copy_dialog(&fx.nav, &entry);
        fx.coord.copy.dest_path = "/b.txt".into();
        fx.coord.copy_file(&mut fx.nav).await;
        assert!(fx.gateway.calls_for("copy").is_empty());
        assert_eq!(fx.gateway.calls_for("transfer").len(), 1);
    }

    #[tokio::test]
    async fn test_direct_transfer_defaults_to_copy_semantics() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;
        let entry = fx.nav.files()[0].clone();

        let outcome = fx
            .coord
            .transfer(&mut fx.nav, &entry, "cloud", "/a.txt", TransferMode::default())
            .await;
        assert_eq!(outcome, OpOutcome::Completed);
        assert!(fx.gateway.check_exists("local", "/a.txt").await.unwrap());
        assert!(fx.gateway.check_exists("cloud", "/a.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_declined_confirmation_changes_nothing() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;
        let entry = fx.nav.files()[0].clone();
        fx.gateway.clear_calls();

        let outcome = fx.coord.delete(&mut fx.nav, &entry, |_| false).await;
        assert_eq!(outcome, OpOutcome::Skipped);
        assert!(fx.gateway.calls().is_empty());
        assert_eq!(fx.messages.shown_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_confirmed_removes_and_refreshes() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/a.txt", "a");
        fx.nav.load_files().await;
        let entry = fx.nav.files()[0].clone();

        let outcome = fx.coord.delete(&mut fx.nav, &entry, |_| true).await;
        assert_eq!(outcome, OpOutcome::Completed);
        assert!(fx.nav.files().is_empty());
    }

    #[tokio::test]
    async fn test_download_derives_filename_from_entry() {
        let mut fx = fixture().await;
        fx.gateway.seed_file("local", "/docs/report.pdf", "pdfbytes");
        let saver = RecordingSaver::default();

        let entry = FileEntry {
            storage_type: "local".into(),
            path: "/docs/report.pdf".into(),
            name: "report.pdf".into(),
            ext: ".pdf".into(),
            size: 8,
            is_dir: false,
            mod_time: chrono::Utc::now(),
        };

        let outcome = fx.coord.download(&fx.nav, &entry, None, &saver).await;
        assert_eq!(outcome, OpOutcome::Completed);
        assert_eq!(*saver.saved.lock(), vec![("report.pdf".to_string(), 8)]);
    }

    #[tokio::test]
    async fn test_download_failure_surfaces_error() {
        let mut fx = fixture().await;
        let saver = RecordingSaver::default();
        let entry = FileEntry {
            storage_type: "local".into(),
            path: "/missing.bin".into(),
            name: "missing.bin".into(),
            ext: ".bin".into(),
            size: 0,
            is_dir: false,
            mod_time: chrono::Utc::now(),
        };

        let outcome = fx.coord.download(&fx.nav, &entry, None, &saver).await;
        assert_eq!(outcome, OpOutcome::Failed);
        assert!(saver.saved.lock().is_empty());
        assert!(fx.messages.current().unwrap().text.contains("File download failed"));
    }
}

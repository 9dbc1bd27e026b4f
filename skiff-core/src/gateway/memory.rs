//! src/gateway/memory.rs
//! ============================================================================
//! # `MemoryGateway`: In-Memory Gateway Double
//!
//! A deterministic [`StorageGateway`] implementation backed by per-provider
//! path maps. Exists for tests and examples; it is not a storage backend.
//! Records every call it receives and supports sticky per-endpoint failure
//! injection so coordinator tests can assert abort/ordering semantics.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use compact_str::{CompactString, format_compact};
use parking_lot::Mutex;

use crate::gateway::storage::{GatewayResult, StorageGateway};
use crate::gateway::types::{FileEntry, GatewayError, Provider, ProgressFn, TransferMode};
use crate::util::paths;

#[derive(Debug, Clone)]
struct Node {
    is_dir: bool,
    data: Bytes,
    mod_time: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    providers: Vec<Provider>,
    /// provider -> absolute path -> node
    trees: HashMap<CompactString, BTreeMap<CompactString, Node>>,
    /// endpoint name -> (calls to let through first, sticky failure)
    failures: HashMap<&'static str, (usize, GatewayError)>,
    /// every call in arrival order, e.g. `"upload local /docs/x.txt"`
    calls: Vec<CompactString>,
    clock: i64,
}

impl State {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        DateTime::from_timestamp(1_700_000_000 + self.clock, 0).unwrap_or_default()
    }

    fn tree_mut(&mut self, provider: &str) -> GatewayResult<&mut BTreeMap<CompactString, Node>> {
        if !self.providers.iter().any(|p| p.storage_type == provider) {
            return Err(GatewayError::rejected(format!(
                "unknown storage provider: {provider}"
            )));
        }
        Ok(self.trees.entry(provider.into()).or_default())
    }

    fn record(&mut self, op: &'static str, detail: &str) -> GatewayResult<()> {
        self.calls.push(format_compact!("{op} {detail}"));
        match self.failures.get_mut(op) {
            Some((skip, _)) if *skip > 0 => {
                *skip -= 1;
                Ok(())
            }
            Some((_, err)) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn entry_of(provider: &str, path: &str, node: &Node) -> FileEntry {
    let name: CompactString = paths::file_name_of(path).into();
    let ext: CompactString = if node.is_dir {
        CompactString::default()
    } else {
        name.rfind('.')
            .map(|idx| CompactString::from(&name[idx..]))
            .unwrap_or_default()
    };

    FileEntry {
        storage_type: provider.into(),
        path: path.into(),
        name,
        ext,
        size: node.data.len() as u64,
        is_dir: node.is_dir,
        mod_time: node.mod_time,
    }
}

/// Parent path of an absolute path; `/a` and `/` both resolve to `/`.
fn parent_of(path: &str) -> &str {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<State>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_providers(providers: Vec<Provider>) -> Self {
        let gw = Self::new();
        gw.state.lock().providers = providers;
        gw
    }

    /// Seed a directory entry without going through `mkdir` bookkeeping.
    pub fn seed_dir(&self, provider: &str, path: &str) {
        let mut state = self.state.lock();
        let mod_time = state.tick();
        state.trees.entry(provider.into()).or_default().insert(
            path.into(),
            Node {
                is_dir: true,
                data: Bytes::new(),
                mod_time,
            },
        );
    }

    /// Seed a file entry with content.
    pub fn seed_file(&self, provider: &str, path: &str, data: impl Into<Bytes>) {
        let mut state = self.state.lock();
        let mod_time = state.tick();
        state.trees.entry(provider.into()).or_default().insert(
            path.into(),
            Node {
                is_dir: false,
                data: data.into(),
                mod_time,
            },
        );
    }

    /// Make every future call to `op` fail with `err` until cleared.
    pub fn inject_failure(&self, op: &'static str, err: GatewayError) {
        self.state.lock().failures.insert(op, (0, err));
    }

    /// Let `succeed_first` calls to `op` through, then fail the rest.
    pub fn inject_failure_after(&self, op: &'static str, succeed_first: usize, err: GatewayError) {
        self.state.lock().failures.insert(op, (succeed_first, err));
    }

    pub fn clear_failures(&self) {
        self.state.lock().failures.clear();
    }

    /// Snapshot of recorded calls, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<CompactString> {
        self.state.lock().calls.clone()
    }

    /// Calls recorded for one endpoint only.
    #[must_use]
    pub fn calls_for(&self, op: &str) -> Vec<CompactString> {
        let prefix = format_compact!("{op} ");
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix.as_str()))
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn copy_node(
        &self,
        op: &'static str,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
        remove_src: bool,
    ) -> GatewayResult<FileEntry> {
        let mut state = self.state.lock();
        state.record(op, &format!("{src_provider}:{src_path} -> {dest_provider}:{dest_path}"))?;

        let node = state
            .tree_mut(src_provider)?
            .get(src_path)
            .cloned()
            .ok_or_else(|| GatewayError::rejected(format!("source not found: {src_path}")))?;

        if remove_src {
            state.tree_mut(src_provider)?.remove(src_path);
        }

        let mod_time = state.tick();
        let node = Node { mod_time, ..node };
        let entry = entry_of(dest_provider, dest_path, &node);
        state.tree_mut(dest_provider)?.insert(dest_path.into(), node);

        Ok(entry)
    }
}

#[async_trait]
impl StorageGateway for MemoryGateway {
    async fn provider_list(&self) -> GatewayResult<Vec<Provider>> {
        let mut state = self.state.lock();
        state.record("provider_list", "")?;
        Ok(state.providers.clone())
    }

    async fn check_exists(&self, provider: &str, path: &str) -> GatewayResult<bool> {
        let mut state = self.state.lock();
        state.record("check_exists", &format!("{provider} {path}"))?;
        Ok(state.tree_mut(provider)?.contains_key(path))
    }

    async fn list(&self, provider: &str, path: &str) -> GatewayResult<Vec<FileEntry>> {
        let mut state = self.state.lock();
        state.record("list", &format!("{provider} {path}"))?;
        let tree = state.tree_mut(provider)?;
        Ok(tree
            .iter()
            .filter(|(p, _)| p.as_str() != path && parent_of(p) == path)
            .map(|(p, node)| entry_of(provider, p, node))
            .collect())
    }

    async fn mkdir(&self, provider: &str, path: &str) -> GatewayResult<FileEntry> {
        let mut state = self.state.lock();
        state.record("mkdir", &format!("{provider} {path}"))?;
        if state.tree_mut(provider)?.contains_key(path) {
            return Err(GatewayError::rejected(format!("already exists: {path}")));
        }
        let mod_time = state.tick();
        let node = Node {
            is_dir: true,
            data: Bytes::new(),
            mod_time,
        };
        let entry = entry_of(provider, path, &node);
        state.tree_mut(provider)?.insert(path.into(), node);
        Ok(entry)
    }

    async fn delete(&self, provider: &str, path: &str) -> GatewayResult<FileEntry> {
        let mut state = self.state.lock();
        state.record("delete", &format!("{provider} {path}"))?;
        let node = state
            .tree_mut(provider)?
            .remove(path)
            .ok_or_else(|| GatewayError::rejected(format!("not found: {path}")))?;
        // Directories take their descendants with them.
        if node.is_dir {
            let prefix = format_compact!("{path}/");
            state
                .tree_mut(provider)?
                .retain(|p, _| !p.starts_with(prefix.as_str()));
        }
        Ok(entry_of(provider, path, &node))
    }

    async fn copy(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry> {
        self.copy_node("copy", src_provider, src_path, dest_provider, dest_path, false)
    }

    async fn move_to(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry> {
        self.copy_node("move", src_provider, src_path, dest_provider, dest_path, true)
    }

    async fn link(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry> {
        self.copy_node("link", src_provider, src_path, dest_provider, dest_path, false)
    }

    async fn soft_link(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
    ) -> GatewayResult<FileEntry> {
        self.copy_node("soft_link", src_provider, src_path, dest_provider, dest_path, false)
    }

    async fn transfer(
        &self,
        src_provider: &str,
        src_path: &str,
        dest_provider: &str,
        dest_path: &str,
        mode: TransferMode,
    ) -> GatewayResult<FileEntry> {
        self.copy_node(
            "transfer",
            src_provider,
            src_path,
            dest_provider,
            dest_path,
            mode == TransferMode::Move,
        )
    }

    async fn upload(
        &self,
        provider: &str,
        path: &str,
        payload: Bytes,
        progress: Option<ProgressFn>,
    ) -> GatewayResult<FileEntry> {
        {
            let mut state = self.state.lock();
            state.record("upload", &format!("{provider} {path}"))?;
        }

        // Two reports, mid-flight and completion, enough to observe the
        // percentage contract without simulating a real transport.
        let total = payload.len() as u64;
        if let Some(cb) = &progress {
            cb(total / 2, total);
            cb(total, total);
        }

        let mut state = self.state.lock();
        let mod_time = state.tick();
        let node = Node {
            is_dir: false,
            data: payload,
            mod_time,
        };
        let entry = entry_of(provider, path, &node);
        state.tree_mut(provider)?.insert(path.into(), node);
        Ok(entry)
    }

    async fn download(&self, provider: &str, path: &str) -> GatewayResult<Bytes> {
        let mut state = self.state.lock();
        state.record("download", &format!("{provider} {path}"))?;
        let node = state
            .tree_mut(provider)?
            .get(path)
            .cloned()
            .ok_or_else(|| GatewayError::rejected(format!("not found: {path}")))?;
        if node.is_dir {
            return Err(GatewayError::rejected(format!("not a file: {path}")));
        }
        Ok(node.data)
    }
}

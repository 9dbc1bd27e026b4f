//! src/model/messages.rs
//! ============================================================================
//! # `Messages`: Session Notification Slot
//!
//! One message is visible at a time across the whole client; showing a new
//! one replaces the old outright (replace-wins, no queue). The slot lives
//! behind a cheaply clonable handle constructed once per process and passed
//! to whichever components surface outcomes, instead of module-level shared
//! state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use compact_str::CompactString;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Notification levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

impl Default for MessageLevel {
    fn default() -> Self {
        Self::Info
    }
}

/// One visible notification with its auto-dismiss deadline.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: CompactString,
    pub level: MessageLevel,
    pub shown_at: Instant,
    pub timeout: Duration,
}

impl Message {
    #[must_use]
    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() >= self.timeout
    }
}

/// Auto-dismiss timeouts per level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MessageTimeouts {
    #[serde(with = "humantime_serde")]
    pub info: Duration,
    #[serde(with = "humantime_serde")]
    pub success: Duration,
    #[serde(with = "humantime_serde")]
    pub warning: Duration,
    #[serde(with = "humantime_serde")]
    pub error: Duration,
}

impl Default for MessageTimeouts {
    fn default() -> Self {
        Self {
            info: Duration::from_secs(4),
            success: Duration::from_secs(4),
            warning: Duration::from_secs(5),
            error: Duration::from_secs(6),
        }
    }
}

impl MessageTimeouts {
    #[must_use]
    pub const fn for_level(&self, level: MessageLevel) -> Duration {
        match level {
            MessageLevel::Info => self.info,
            MessageLevel::Success => self.success,
            MessageLevel::Warning => self.warning,
            MessageLevel::Error => self.error,
        }
    }
}

/// Clonable handle to the session's single notification slot.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    current: Arc<RwLock<Option<Message>>>,
    timeouts: MessageTimeouts,
    shown: Arc<AtomicU64>,
}

impl Messages {
    #[must_use]
    pub fn new(timeouts: MessageTimeouts) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            timeouts,
            shown: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replace the visible message.
    pub fn show(&self, text: impl Into<CompactString>, level: MessageLevel) {
        self.shown.fetch_add(1, Ordering::Relaxed);
        *self.current.write() = Some(Message {
            text: text.into(),
            level,
            shown_at: Instant::now(),
            timeout: self.timeouts.for_level(level),
        });
    }

    pub fn info(&self, text: impl Into<CompactString>) {
        self.show(text, MessageLevel::Info);
    }

    pub fn success(&self, text: impl Into<CompactString>) {
        self.show(text, MessageLevel::Success);
    }

    pub fn warning(&self, text: impl Into<CompactString>) {
        self.show(text, MessageLevel::Warning);
    }

    pub fn error(&self, text: impl Into<CompactString>) {
        self.show(text, MessageLevel::Error);
    }

    /// Surface a failed operation with a human-readable prefix.
    pub fn surface(&self, context: &str, err: &AppError) {
        self.error(compact_str::format_compact!("{context}: {err}"));
    }

    pub fn hide(&self) {
        *self.current.write() = None;
    }

    /// Snapshot of the visible message, if any.
    #[must_use]
    pub fn current(&self) -> Option<Message> {
        self.current.read().clone()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current.read().is_some()
    }

    /// Total messages shown this session (replacements included).
    #[must_use]
    pub fn shown_count(&self) -> u64 {
        self.shown.load(Ordering::Relaxed)
    }

    /// Drop the message once its deadline passed. Returns true if dismissed.
    pub fn dismiss_expired(&self) -> bool {
        let mut slot = self.current.write();
        if slot.as_ref().is_some_and(Message::expired) {
            *slot = None;
            return true;
        }
        false
    }
}

//! src/model/dialog.rs
//! ============================================================================
//! # `DialogRegistry`: Single Active Modal Session
//!
//! Tracks at most one active modal dialog and its success/close/open
//! callbacks, decoupling dialog triggers from dialog consumers. Two states:
//! Closed (no session) and Open (exactly one session). Opening while Open
//! replaces the prior session outright and discards its handlers without
//! invoking them; callers must not assume a previously registered callback
//! will ever fire once a second open happens first.
//!
//! The registry is a constructed handle around shared interior state,
//! created once per process and cloned into whichever components need it.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use parking_lot::Mutex;
use serde_json::Value;

/// Dialog discriminator. `Custom` carries an application-defined tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogType {
    MediaRecognition,
    Custom(CompactString),
}

/// Callback set registered with one dialog session.
///
/// `on_open` may fire any number of times while the session is open (e.g.
/// on animation-complete); `on_success` and `on_close` fire at most once,
/// right before the session clears.
#[derive(Default)]
pub struct DialogHandlers {
    pub on_open: Option<Box<dyn FnMut() + Send>>,
    pub on_success: Option<Box<dyn FnOnce(Value) + Send>>,
    pub on_close: Option<Box<dyn FnOnce() + Send>>,
}

impl DialogHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_open(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_open = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_success(mut self, f: impl FnOnce(Value) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_close(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for DialogHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogHandlers")
            .field("on_open", &self.on_open.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

#[derive(Debug)]
struct DialogSession {
    dialog_type: DialogType,
    visible: bool,
    props: Value,
    handlers: DialogHandlers,
}

/// Observer-facing snapshot of the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSnapshot {
    pub dialog_type: DialogType,
    pub visible: bool,
    pub props: Value,
}

/// Clonable handle to the process-wide dialog slot.
#[derive(Debug, Clone, Default)]
pub struct DialogRegistry {
    inner: Arc<Mutex<Option<DialogSession>>>,
}

impl DialogRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a dialog, replacing any active session and its handlers.
    pub fn open_dialog(&self, dialog_type: DialogType, props: Value, handlers: DialogHandlers) {
        *self.inner.lock() = Some(DialogSession {
            dialog_type,
            visible: true,
            props,
            handlers,
        });
    }

    /// Convenience wrapper for the media recognition dialog.
    pub fn open_media_recognition(&self, handlers: DialogHandlers) {
        self.open_dialog(DialogType::MediaRecognition, Value::Null, handlers);
    }

    /// Fire `on_open` if registered. Does not change state and may be
    /// called any number of times while a session is open.
    pub fn handle_dialog_open(&self) {
        // Invoke outside the lock so the handler may reenter the registry.
        let mut cb = match self.inner.lock().as_mut() {
            Some(session) => match session.handlers.on_open.take() {
                Some(cb) => cb,
                None => return,
            },
            None => return,
        };

        cb();

        // Put the handler back unless the session was replaced or closed
        // while it ran (in which case its registration died with it).
        if let Some(session) = self.inner.lock().as_mut()
            && session.handlers.on_open.is_none()
        {
            session.handlers.on_open = Some(cb);
        }
    }

    /// Fire `on_success(data)` if registered, then clear the session and
    /// all handler slots.
    pub fn handle_dialog_success(&self, data: Value) {
        let session = self.inner.lock().take();
        if let Some(session) = session
            && let Some(cb) = session.handlers.on_success
        {
            cb(data);
        }
    }

    /// Fire `on_close` if registered, then clear the session and all
    /// handler slots. Safe no-op when already closed.
    pub fn handle_dialog_close(&self) {
        let session = self.inner.lock().take();
        if let Some(session) = session
            && let Some(cb) = session.handlers.on_close
        {
            cb();
        }
    }

    /// Programmatic dismissal: clear without firing any handler.
    pub fn close_dialog(&self) {
        self.inner.lock().take();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Snapshot of the active session for rendering surfaces.
    #[must_use]
    pub fn active(&self) -> Option<DialogSnapshot> {
        self.inner.lock().as_ref().map(|session| DialogSnapshot {
            dialog_type: session.dialog_type.clone(),
            visible: session.visible,
            props: session.props.clone(),
        })
    }
}

//! Testing utilities for wirehook.
//!
//! This module provides utilities to make testing handlers easier.
//!
//! # Features
//!
//! - [`RecordingHandler`]: A handler that records every hook invocation
//! - [`HookTrail`]: The carrier value a recording handler appends to
//! - [`MockConn`]: A connection handle that records notifications
//! - [`SharedBuf`]: An in-memory sink readable while a handler owns it

use std::{
    io::{self, Write},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use wirehook_core::{
    Conn, ConnError, ConnId, Context, Direction, DynError, Handler, Id, RawValue, WireRequest,
    WireResponse,
};

// ============================================================================
// Recording Handler
// ============================================================================

/// One recorded hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// `cancel` was called.
    Cancel {
        /// The cancelled call.
        id: Id,
        /// The flag the handler was given.
        already_cancelled: bool,
    },
    /// `request` was called.
    Request {
        /// Direction of the message.
        direction: Direction,
        /// Method name.
        method: String,
        /// Call id, absent for notifications.
        id: Option<Id>,
    },
    /// `response` was called.
    Response {
        /// Direction of the message.
        direction: Direction,
        /// Call id.
        id: Option<Id>,
        /// Whether the response carried an error object.
        is_error: bool,
    },
    /// `done` was called.
    Done {
        /// Rendered error, if the request failed.
        error: Option<String>,
        /// The trail found in the carrier at that point.
        trail: Vec<String>,
    },
    /// `read` was called.
    Read {
        /// Bytes read.
        bytes: u64,
    },
    /// `wrote` was called.
    Wrote {
        /// Bytes written.
        bytes: u64,
    },
    /// `error` was called.
    Error {
        /// Rendered error.
        message: String,
    },
}

/// Carrier value listing the hooks a recording handler has seen for one
/// message, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookTrail(Vec<String>);

impl HookTrail {
    /// The recorded entries.
    pub fn entries(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    fn push(mut self, entry: String) -> Self {
        self.0.push(entry);
        self
    }
}

/// A handler that records all hook invocations it receives.
///
/// Carrier-returning hooks also extend the carrier's [`HookTrail`], so tests
/// can check which hooks a given message passed through.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// let handle = recorder.clone();
///
/// // Hand `recorder` to a connection...
///
/// assert_eq!(handle.count(), 3);
/// ```
pub struct RecordingHandler {
    name: Option<&'static str>,
    events: Arc<Mutex<Vec<HookEvent>>>,
    cancel_result: bool,
}

impl RecordingHandler {
    /// Create a new recording handler whose `cancel` returns `false`.
    pub fn new() -> Self {
        Self {
            name: None,
            events: Arc::new(Mutex::new(Vec::new())),
            cancel_result: false,
        }
    }

    /// Create a recording handler that prefixes trail entries with `name`.
    pub fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::new()
        }
    }

    /// Sets what `cancel` returns when the call was not already cancelled.
    pub fn with_cancel_result(mut self, result: bool) -> Self {
        self.cancel_result = result;
        self
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: HookEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn mark(&self, cx: Context, hook: &str) -> Context {
        let entry = match self.name {
            Some(name) => format!("{name}:{hook}"),
            None => hook.to_owned(),
        };
        let trail = cx.get::<HookTrail>().cloned().unwrap_or_default();
        cx.with(trail.push(entry))
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHandler {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            events: self.events.clone(),
            cancel_result: self.cancel_result,
        }
    }
}

impl Handler for RecordingHandler {
    fn cancel(&self, _cx: &Context, _conn: &dyn Conn, id: &Id, already_cancelled: bool) -> bool {
        self.record(HookEvent::Cancel {
            id: id.clone(),
            already_cancelled,
        });
        self.cancel_result && !already_cancelled
    }

    fn request(
        &self,
        cx: Context,
        _conn: &dyn Conn,
        direction: Direction,
        req: &WireRequest,
    ) -> Context {
        self.record(HookEvent::Request {
            direction,
            method: req.method.clone(),
            id: req.id.clone(),
        });
        self.mark(cx, "request")
    }

    fn response(
        &self,
        cx: Context,
        _conn: &dyn Conn,
        direction: Direction,
        resp: &WireResponse,
    ) -> Context {
        self.record(HookEvent::Response {
            direction,
            id: resp.id.clone(),
            is_error: resp.is_error(),
        });
        self.mark(cx, "response")
    }

    fn done(&self, cx: &Context, err: Option<&DynError>) {
        let trail = cx
            .get::<HookTrail>()
            .map(|trail| trail.0.clone())
            .unwrap_or_default();
        self.record(HookEvent::Done {
            error: err.map(ToString::to_string),
            trail,
        });
    }

    fn read(&self, cx: Context, bytes: u64) -> Context {
        self.record(HookEvent::Read { bytes });
        self.mark(cx, "read")
    }

    fn wrote(&self, cx: Context, bytes: u64) -> Context {
        self.record(HookEvent::Wrote { bytes });
        self.mark(cx, "wrote")
    }

    fn error(&self, _cx: &Context, err: &DynError) {
        self.record(HookEvent::Error {
            message: err.to_string(),
        });
    }
}

// ============================================================================
// Mock Connection
// ============================================================================

/// A notification captured by [`MockConn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// Method name.
    pub method: String,
    /// Raw params text.
    pub params: Option<String>,
}

/// A connection handle that records notifications instead of sending them.
///
/// Like a real connection it refuses carriers in cancelled state. It can be
/// switched into a failing mode to exercise error paths.
pub struct MockConn {
    id: ConnId,
    sent: Mutex<Vec<SentNotification>>,
    closed: AtomicBool,
}

impl MockConn {
    /// Create a mock connection with a fresh identity.
    pub fn new() -> Self {
        Self::with_id(ConnId::next())
    }

    /// Create a mock connection with a fixed identity.
    pub fn with_id(id: ConnId) -> Self {
        Self {
            id,
            sent: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Makes every later `notify` fail with [`ConnError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the notifications sent so far.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockConn {
    fn default() -> Self {
        Self::new()
    }
}

impl Conn for MockConn {
    fn id(&self) -> ConnId {
        self.id
    }

    fn notify(
        &self,
        cx: &Context,
        method: &str,
        params: Option<Box<RawValue>>,
    ) -> Result<(), ConnError> {
        if cx.is_cancelled() {
            return Err(ConnError::Cancelled);
        }
        if self.closed.load(Ordering::SeqCst) {
            return Err(ConnError::Closed);
        }
        self.sent.lock().unwrap().push(SentNotification {
            method: method.to_owned(),
            params: params.map(|raw| raw.get().to_owned()),
        });
        Ok(())
    }
}

// ============================================================================
// Shared Buffer
// ============================================================================

/// An in-memory writer whose contents stay readable through clones.
///
/// Hand one clone to a [`FileHandler`](crate::FileHandler) and keep another
/// to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct SharedBuf {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! Tracing Handler - Observability for message processing.

use crate::display::OrNil;
use std::time::{Duration, Instant};
use wirehook_core::{
    Conn, Context, Direction, DynError, Handler, Id, WireRequest, WireResponse,
};

/// Carrier value recording when processing of a message started.
#[derive(Debug, Clone)]
pub struct Started {
    at: Instant,
    method: Option<String>,
    direction: Direction,
}

impl Started {
    /// When the first hook for the message ran.
    pub fn at(&self) -> Instant {
        self.at
    }

    /// Time since the first hook for the message ran.
    pub fn elapsed(&self) -> Duration {
        self.at.elapsed()
    }

    /// Method name, when the message began as a request.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Direction of the message that started the chain.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Carrier value tallying the bytes attributed to a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transferred {
    /// Bytes read from the transport.
    pub read: u64,
    /// Bytes written to the transport.
    pub written: u64,
}

/// A handler that emits `tracing` events for every hook.
///
/// It annotates each message's carrier with a [`Started`] timestamp and a
/// running [`Transferred`] tally, so `done` can report how long the message
/// took and how many bytes it moved. Outgoing calls keep the timestamp set by
/// their request; the matching response does not reset it.
///
/// # Example
///
/// ```rust,ignore
/// use wirehook_std::{FileHandler, TracingHandler};
/// use wirehook_core::Handler;
///
/// let handler = TracingHandler::named("lsp").chain(FileHandler::stderr());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingHandler {
    name: &'static str,
}

impl TracingHandler {
    /// Create a new `TracingHandler` with a default name.
    pub const fn new() -> Self {
        Self { name: "rpc" }
    }

    /// Create a new `TracingHandler` with a custom name.
    ///
    /// The name is used in log events to identify the connection's role.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log events.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn start(cx: Context, method: Option<&str>, direction: Direction) -> Context {
        if cx.contains::<Started>() {
            return cx;
        }
        cx.with(Started {
            at: Instant::now(),
            method: method.map(str::to_owned),
            direction,
        })
    }
}

impl Default for TracingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for TracingHandler {
    fn cancel(&self, cx: &Context, conn: &dyn Conn, id: &Id, already_cancelled: bool) -> bool {
        tracing::debug!(
            name = %self.name,
            conn = %conn.id(),
            %id,
            already_cancelled,
            cancelled_context = cx.is_cancelled(),
            "call cancelled"
        );
        false
    }

    fn request(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        req: &WireRequest,
    ) -> Context {
        tracing::debug!(
            name = %self.name,
            conn = %conn.id(),
            %direction,
            method = %req.method,
            id = %OrNil(req.id.as_ref()),
            "request"
        );
        Self::start(cx, Some(req.method.as_str()), direction)
    }

    fn response(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        resp: &WireResponse,
    ) -> Context {
        tracing::debug!(
            name = %self.name,
            conn = %conn.id(),
            %direction,
            id = %OrNil(resp.id.as_ref()),
            error = %OrNil(resp.error.as_ref()),
            "response"
        );
        Self::start(cx, None, direction)
    }

    fn done(&self, cx: &Context, err: Option<&DynError>) {
        let started = cx.get::<Started>();
        let elapsed = started.map(Started::elapsed);
        let method = started.and_then(Started::method).unwrap_or_default();
        let transferred = cx.get::<Transferred>().copied().unwrap_or_default();

        match err {
            Some(err) => tracing::warn!(
                name = %self.name,
                method,
                ?elapsed,
                bytes_read = transferred.read,
                bytes_written = transferred.written,
                error = %err,
                "request failed"
            ),
            None => tracing::debug!(
                name = %self.name,
                method,
                ?elapsed,
                bytes_read = transferred.read,
                bytes_written = transferred.written,
                "request done"
            ),
        }
    }

    fn read(&self, cx: Context, bytes: u64) -> Context {
        tracing::trace!(name = %self.name, bytes, "read");
        let tally = cx.get::<Transferred>().copied().unwrap_or_default();
        cx.with(Transferred {
            read: tally.read.saturating_add(bytes),
            ..tally
        })
    }

    fn wrote(&self, cx: Context, bytes: u64) -> Context {
        tracing::trace!(name = %self.name, bytes, "wrote");
        let tally = cx.get::<Transferred>().copied().unwrap_or_default();
        cx.with(Transferred {
            written: tally.written.saturating_add(bytes),
            ..tally
        })
    }

    fn error(&self, _cx: &Context, err: &DynError) {
        tracing::warn!(name = %self.name, error = %err, "undeliverable error");
    }
}

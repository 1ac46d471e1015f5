//! Diagnostic handler that writes every request and response to a sink.
//!
//! Each event becomes one flat, greppable block:
//!
//! ```text
//! conn 0x1 response send:
//! jsonrpc: 2.0
//! method: initialize
//! params: {"rootUri":null}
//! id: 1
//!
//! ```
//!
//! The header reads `response` for requests as well. Responses carry
//! `result`, `error` and `id` instead of `method`, `params` and `id`. Absent
//! fields print as `<nil>`. Numeric ids print their number; string ids print
//! their name. The format promises field order and presence, nothing more.

use crate::display::OrNil;
use std::{
    io::{self, Write},
    sync::Mutex,
};
use thiserror::Error;
use wirehook_core::{Conn, ConnId, Context, Direction, Handler, WireRequest, WireResponse};

/// Failure writing a block to the sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The underlying writer failed.
    #[error("failed to write to sink")]
    Io(#[from] io::Error),

    /// A writer panicked while holding the sink.
    #[error("sink lock poisoned")]
    Poisoned,
}

/// A handler that logs requests and responses to a writer.
///
/// Usually used with standard error or standard output. Each block is
/// formatted in full and written with a single `write_all` while the sink is
/// locked, so concurrent messages never interleave partial blocks. The sink
/// is owned for the handler's lifetime and released when it is dropped.
///
/// A failed write is not propagated; it is logged with `tracing` and the
/// carrier is returned unchanged. The [`error`](Handler::error) hook keeps
/// its default, so undeliverable errors from the connection are left to
/// other handlers.
pub struct FileHandler<W = io::Stderr> {
    sink: Mutex<W>,
}

impl FileHandler<io::Stderr> {
    /// Logs to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl FileHandler<io::Stdout> {
    /// Logs to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> FileHandler<W> {
    /// Logs to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Releases the sink.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.sink.into_inner().map_err(|_| SinkError::Poisoned)
    }
}

impl<W: Write + Send> FileHandler<W> {
    fn write_block(&self, block: &str) -> Result<(), SinkError> {
        let mut sink = self.sink.lock().map_err(|_| SinkError::Poisoned)?;
        sink.write_all(block.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn record(&self, block: &str) {
        if let Err(err) = self.write_block(block) {
            tracing::warn!(error = %err, "could not write diagnostic block");
        }
    }
}

impl<W> std::fmt::Debug for FileHandler<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandler").finish_non_exhaustive()
    }
}

/// Formats the block written for a request or notification.
pub fn request_block(conn: ConnId, direction: Direction, req: &WireRequest) -> String {
    format!(
        "conn {conn} response {direction}:\n\
         jsonrpc: 2.0\n\
         method: {}\n\
         params: {}\n\
         id: {}\n\n",
        req.method,
        OrNil(req.params.as_deref()),
        OrNil(req.id.as_ref()),
    )
}

/// Formats the block written for a response.
pub fn response_block(conn: ConnId, direction: Direction, resp: &WireResponse) -> String {
    format!(
        "conn {conn} response {direction}:\n\
         jsonrpc: 2.0\n\
         result: {}\n\
         error: {}\n\
         id: {}\n\n",
        OrNil(resp.result.as_deref()),
        OrNil(resp.error.as_ref()),
        OrNil(resp.id.as_ref()),
    )
}

impl<W: Write + Send> Handler for FileHandler<W> {
    fn request(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        req: &WireRequest,
    ) -> Context {
        self.record(&request_block(conn.id(), direction, req));
        cx
    }

    fn response(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        resp: &WireResponse,
    ) -> Context {
        self.record(&response_block(conn.id(), direction, resp));
        cx
    }
}

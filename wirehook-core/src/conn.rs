//! The connection handle as seen from a hook.

use crate::{context::Context, error::ConnError};
use serde_json::value::RawValue;
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a connection, used to tag diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(u64);

impl ConnId {
    /// Wraps a raw identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocates a process-unique identity.
    pub fn next() -> Self {
        Self(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// The connection that owns a handler.
///
/// Hooks receive it to identify where an event happened and, during
/// cancellation, to send follow-up notifications to the peer.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a connection handle",
    label = "missing `Conn` implementation",
    note = "Connections must expose an identity and a way to send notifications."
)]
pub trait Conn: Send + Sync {
    /// Identity of this connection.
    fn id(&self) -> ConnId;

    /// Sends a notification to the peer.
    ///
    /// Implementations should refuse a carrier in cancelled state with
    /// [`ConnError::Cancelled`].
    fn notify(
        &self,
        cx: &Context,
        method: &str,
        params: Option<Box<RawValue>>,
    ) -> Result<(), ConnError>;
}

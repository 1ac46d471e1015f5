//! Error types for wirehook.
//!
//! - [`DynError`] / [`BoxError`] - the erased error shape hooks receive
//! - [`ConnError`] - failures reported by a [`Conn`](crate::Conn) when sending

use thiserror::Error;

/// The erased error type passed by reference to `done` and `error`.
pub type DynError = dyn std::error::Error + Send + Sync + 'static;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<DynError>;

/// Errors a connection can report when asked to send a notification.
#[derive(Error, Debug)]
pub enum ConnError {
    /// The connection has been closed.
    #[error("connection is closed")]
    Closed,

    /// The send was attempted with a carrier in cancelled state.
    #[error("cannot send with a cancelled context")]
    Cancelled,

    /// The notification payload could not be encoded.
    #[error("failed to encode notification params")]
    Encode(#[from] serde_json::Error),

    /// The transport rejected the write.
    #[error("transport error")]
    Transport(#[source] BoxError),
}

impl From<BoxError> for ConnError {
    fn from(err: BoxError) -> Self {
        ConnError::Transport(err)
    }
}

//! Cancellation notifier.
//!
//! When this side gives up on an outgoing call, the peer is still working on
//! it. [`CancelNotifier`] tells the peer by sending a notification naming the
//! abandoned call, the way language-server peers expect.

use serde::Serialize;
use std::borrow::Cow;
use wirehook_core::{Conn, ConnError, Context, Handler, Id};

/// Method used to notify the peer of a cancelled call.
pub const CANCEL_METHOD: &str = "$/cancelRequest";

#[derive(Serialize)]
struct CancelParams<'a> {
    id: &'a Id,
}

/// A handler that forwards cancellations of outgoing calls to the peer.
///
/// On `cancel` it sends `{"id": <id>}` to the configured method using a
/// fresh background carrier, since the carrier it is given is already
/// cancelled. It returns `true` once the notification is sent, so later
/// handlers in a chain see the call as already cancelled. If an earlier
/// handler already handled the cancellation, nothing is sent.
///
/// A failed send is logged with `tracing` and the cancellation is left
/// unhandled.
#[derive(Debug, Clone)]
pub struct CancelNotifier {
    method: Cow<'static, str>,
}

impl CancelNotifier {
    /// Notifies with [`CANCEL_METHOD`].
    pub const fn new() -> Self {
        Self {
            method: Cow::Borrowed(CANCEL_METHOD),
        }
    }

    /// Notifies with a custom method name.
    pub fn with_method(method: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method: method.into(),
        }
    }

    /// The method name used for the notification.
    pub fn method(&self) -> &str {
        &self.method
    }

    fn notify(&self, cx: &Context, conn: &dyn Conn, id: &Id) -> Result<(), ConnError> {
        let params = serde_json::value::to_raw_value(&CancelParams { id })?;
        conn.notify(cx, &self.method, Some(params))
    }
}

impl Default for CancelNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for CancelNotifier {
    fn cancel(&self, _cx: &Context, conn: &dyn Conn, id: &Id, already_cancelled: bool) -> bool {
        if already_cancelled {
            return false;
        }
        let background = Context::background();
        match self.notify(&background, conn, id) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    method = %self.method,
                    %id,
                    error = %err,
                    "failed to notify peer of cancellation"
                );
                false
            }
        }
    }
}

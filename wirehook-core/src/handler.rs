//! # Hook Contract (Handler)
//!
//! [`Handler`] is the single interface a connection calls while processing
//! messages. Every hook has a provided implementation with identity or no-op
//! behaviour, so a concrete handler overrides only the hooks it cares about
//! and inherits the rest.
//!
//! # Firing Points
//!
//! | Hook | Fires |
//! |---|---|
//! | [`cancel`](Handler::cancel) | an outgoing call issued by this side is cancelled |
//! | [`request`](Handler::request) | near the start of processing any request or notification |
//! | [`response`](Handler::response) | near the start of processing any response |
//! | [`done`](Handler::done) | a request or notification is fully processed |
//! | [`read`](Handler::read) | bytes read from the transport were attributed to a message |
//! | [`wrote`](Handler::wrote) | bytes were written to the transport |
//! | [`error`](Handler::error) | an error cannot be delivered to the peer |
//!
//! # Concurrency
//!
//! A connection may process many messages at once, so hooks are invoked
//! concurrently with distinct arguments. Handlers are `Send + Sync` and guard
//! any shared state themselves. Hooks should return promptly; blocking inside
//! one stalls that message.

use crate::{
    chain::Chain,
    conn::Conn,
    context::Context,
    direction::Direction,
    error::DynError,
    wire::{Id, WireRequest, WireResponse},
};
use std::sync::Arc;

/// Hooks into the message handling of an RPC connection.
///
/// # Example
///
/// ```rust
/// use wirehook_core::{Conn, Context, Direction, Handler, WireRequest};
///
/// #[derive(Debug, PartialEq)]
/// struct Method(String);
///
/// struct RememberMethod;
///
/// impl Handler for RememberMethod {
///     fn request(
///         &self,
///         cx: Context,
///         _conn: &dyn Conn,
///         _direction: Direction,
///         req: &WireRequest,
///     ) -> Context {
///         cx.with(Method(req.method.clone()))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Handler`",
    label = "missing `Handler` implementation",
    note = "Implement `Handler` and override only the hooks you need; the rest default to no-ops."
)]
pub trait Handler: Send + Sync {
    /// Invoked for a cancelled outgoing call.
    ///
    /// `cx` is in cancelled state; to send notifications on `conn` use
    /// [`Context::background`] instead. `already_cancelled` is `true` when an
    /// earlier handler in a composed chain already dealt with the
    /// cancellation. Returning `true` reports that this handler dealt with it,
    /// and later handlers must not cancel again.
    fn cancel(&self, _cx: &Context, _conn: &dyn Conn, _id: &Id, _already_cancelled: bool) -> bool {
        false
    }

    /// Called near the start of processing any request or notification.
    fn request(
        &self,
        cx: Context,
        _conn: &dyn Conn,
        _direction: Direction,
        _req: &WireRequest,
    ) -> Context {
        cx
    }

    /// Called near the start of processing any response.
    fn response(
        &self,
        cx: Context,
        _conn: &dyn Conn,
        _direction: Direction,
        _resp: &WireResponse,
    ) -> Context {
        cx
    }

    /// Called once a request is fully processed.
    ///
    /// For calls this is after the response has been processed; for
    /// notifications, as soon as the message was written. `Some(err)` means
    /// the request failed.
    fn done(&self, _cx: &Context, _err: Option<&DynError>) {}

    /// Called with the byte count of each read, once the data has been
    /// attributed to a request or response.
    fn read(&self, cx: Context, _bytes: u64) -> Context {
        cx
    }

    /// Called with the byte count of each write to the transport.
    fn wrote(&self, cx: Context, _bytes: u64) -> Context {
        cx
    }

    /// Called with errors that cannot be delivered through the normal
    /// response path, such as a failure while processing a notification.
    fn error(&self, _cx: &Context, _err: &DynError) {}

    /// Composes this handler with `next`; both see every hook, in order.
    fn chain<N>(self, next: N) -> Chain<Self, N>
    where
        Self: Sized,
        N: Handler,
    {
        Chain::new(self, next)
    }
}

macro_rules! forward_handler {
    () => {
        fn cancel(&self, cx: &Context, conn: &dyn Conn, id: &Id, already_cancelled: bool) -> bool {
            (**self).cancel(cx, conn, id, already_cancelled)
        }

        fn request(
            &self,
            cx: Context,
            conn: &dyn Conn,
            direction: Direction,
            req: &WireRequest,
        ) -> Context {
            (**self).request(cx, conn, direction, req)
        }

        fn response(
            &self,
            cx: Context,
            conn: &dyn Conn,
            direction: Direction,
            resp: &WireResponse,
        ) -> Context {
            (**self).response(cx, conn, direction, resp)
        }

        fn done(&self, cx: &Context, err: Option<&DynError>) {
            (**self).done(cx, err)
        }

        fn read(&self, cx: Context, bytes: u64) -> Context {
            (**self).read(cx, bytes)
        }

        fn wrote(&self, cx: Context, bytes: u64) -> Context {
            (**self).wrote(cx, bytes)
        }

        fn error(&self, cx: &Context, err: &DynError) {
            (**self).error(cx, err)
        }
    };
}

impl<H: Handler + ?Sized> Handler for &H {
    forward_handler!();
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    forward_handler!();
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    forward_handler!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{conn::ConnId, error::ConnError};
    use serde_json::value::RawValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullConn;

    impl Conn for NullConn {
        fn id(&self) -> ConnId {
            ConnId::new(1)
        }

        fn notify(
            &self,
            _cx: &Context,
            _method: &str,
            _params: Option<Box<RawValue>>,
        ) -> Result<(), ConnError> {
            Ok(())
        }
    }

    struct Defaults;

    impl Handler for Defaults {}

    #[derive(Debug, PartialEq)]
    struct Seen(&'static str);

    struct CountingDone {
        ok: AtomicUsize,
        failed: AtomicUsize,
    }

    impl Handler for CountingDone {
        fn done(&self, _cx: &Context, err: Option<&DynError>) {
            match err {
                Some(_) => self.failed.fetch_add(1, Ordering::SeqCst),
                None => self.ok.fetch_add(1, Ordering::SeqCst),
            };
        }
    }

    #[test]
    fn test_defaults_are_identity() {
        let cx = Context::background().with(Seen("x"));
        let req = WireRequest::call(1, "foo", None);
        let resp = WireResponse::success(1, None);

        let out = Defaults.request(cx.clone(), &NullConn, Direction::Send, &req);
        assert!(out.ptr_eq(&cx));
        let out = Defaults.response(out, &NullConn, Direction::Receive, &resp);
        assert!(out.ptr_eq(&cx));
        let out = Defaults.read(out, 10);
        let out = Defaults.wrote(out, 20);
        assert!(out.ptr_eq(&cx));
        assert!(!Defaults.cancel(&cx.clone().cancelled(), &NullConn, &Id::from(1), false));
    }

    #[test]
    fn test_done_distinguishes_failure() {
        let handler = CountingDone {
            ok: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        };
        let err = std::io::Error::other("boom");

        handler.done(&Context::background(), None);
        handler.done(&Context::background(), Some(&err));

        assert_eq!(handler.ok.load(Ordering::SeqCst), 1);
        assert_eq!(handler.failed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_forwarding_impls() {
        struct Marking;
        impl Handler for Marking {
            fn read(&self, cx: Context, _bytes: u64) -> Context {
                cx.with(Seen("read"))
            }
        }

        let boxed: Box<dyn Handler> = Box::new(Marking);
        let shared: Arc<dyn Handler> = Arc::new(Marking);
        let borrowed = &Marking;

        let handlers: [&dyn Handler; 3] = [&boxed, &shared, &borrowed];
        for handler in handlers {
            let cx = handler.read(Context::background(), 1);
            assert_eq!(cx.get::<Seen>(), Some(&Seen("read")));
        }
    }
}

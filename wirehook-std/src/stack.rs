//! Dynamic composition of any number of handlers.

use std::{fmt, sync::Arc};
use wirehook_core::{
    Conn, Context, Direction, DynError, Handler, Id, WireRequest, WireResponse,
};

/// An ordered list of handlers that behaves as one.
///
/// Every hook runs on each handler in registration order. Carriers are
/// threaded from one handler to the next. For `cancel`, each handler is told
/// whether an earlier one (or the caller) already dealt with the
/// cancellation; the stack returns `true` if any of its handlers did.
///
/// An empty stack behaves exactly like [`EmptyHandler`](crate::EmptyHandler).
#[derive(Clone, Default)]
pub struct HandlerStack {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerStack {
    /// Starts building a stack.
    pub fn builder() -> HandlerStackBuilder {
        HandlerStackBuilder::new()
    }

    /// Number of handlers in the stack.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the stack has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerStack")
            .field("len", &self.handlers.len())
            .finish()
    }
}

impl Handler for HandlerStack {
    fn cancel(&self, cx: &Context, conn: &dyn Conn, id: &Id, already_cancelled: bool) -> bool {
        let mut handled = false;
        for handler in &self.handlers {
            if handler.cancel(cx, conn, id, already_cancelled || handled) {
                handled = true;
            }
        }
        handled
    }

    fn request(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        req: &WireRequest,
    ) -> Context {
        self.handlers
            .iter()
            .fold(cx, |cx, handler| handler.request(cx, conn, direction, req))
    }

    fn response(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        resp: &WireResponse,
    ) -> Context {
        self.handlers
            .iter()
            .fold(cx, |cx, handler| handler.response(cx, conn, direction, resp))
    }

    fn done(&self, cx: &Context, err: Option<&DynError>) {
        for handler in &self.handlers {
            handler.done(cx, err);
        }
    }

    fn read(&self, cx: Context, bytes: u64) -> Context {
        self.handlers
            .iter()
            .fold(cx, |cx, handler| handler.read(cx, bytes))
    }

    fn wrote(&self, cx: Context, bytes: u64) -> Context {
        self.handlers
            .iter()
            .fold(cx, |cx, handler| handler.wrote(cx, bytes))
    }

    fn error(&self, cx: &Context, err: &DynError) {
        for handler in &self.handlers {
            handler.error(cx, err);
        }
    }
}

/// Builder for constructing a [`HandlerStack`].
#[derive(Default)]
pub struct HandlerStackBuilder {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerStackBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn register<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Appends a handler that is already shared.
    pub fn register_shared(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Build the stack.
    pub fn build(self) -> HandlerStack {
        HandlerStack {
            handlers: self.handlers,
        }
    }
}

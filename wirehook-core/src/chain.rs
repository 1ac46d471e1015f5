//! Static composition of two handlers.

use crate::{
    conn::Conn,
    context::Context,
    direction::Direction,
    error::DynError,
    handler::Handler,
    wire::{Id, WireRequest, WireResponse},
};

/// Runs `first` and then `second` for every hook.
///
/// The carrier returned by `first` is what `second` receives. For `cancel`,
/// `second` is told the call was already cancelled if `first` handled it,
/// and the chain reports a cancellation if either did.
///
/// Usually built with [`Handler::chain`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    /// Composes two handlers.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The handler that runs first.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The handler that runs second.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Splits the chain back into its parts.
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Handler, B: Handler> Handler for Chain<A, B> {
    fn cancel(&self, cx: &Context, conn: &dyn Conn, id: &Id, already_cancelled: bool) -> bool {
        let first = self.first.cancel(cx, conn, id, already_cancelled);
        let second = self.second.cancel(cx, conn, id, already_cancelled || first);
        first || second
    }

    fn request(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        req: &WireRequest,
    ) -> Context {
        let cx = self.first.request(cx, conn, direction, req);
        self.second.request(cx, conn, direction, req)
    }

    fn response(
        &self,
        cx: Context,
        conn: &dyn Conn,
        direction: Direction,
        resp: &WireResponse,
    ) -> Context {
        let cx = self.first.response(cx, conn, direction, resp);
        self.second.response(cx, conn, direction, resp)
    }

    fn done(&self, cx: &Context, err: Option<&DynError>) {
        self.first.done(cx, err);
        self.second.done(cx, err);
    }

    fn read(&self, cx: Context, bytes: u64) -> Context {
        let cx = self.first.read(cx, bytes);
        self.second.read(cx, bytes)
    }

    fn wrote(&self, cx: Context, bytes: u64) -> Context {
        let cx = self.first.wrote(cx, bytes);
        self.second.wrote(cx, bytes)
    }

    fn error(&self, cx: &Context, err: &DynError) {
        self.first.error(cx, err);
        self.second.error(cx, err);
    }
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use wirehook::{
    Conn, Context, Direction, DynError, Handler, Id, RawValue, WireRequest, WireResponse,
};

// ============================================================================
// Payloads
// ============================================================================

pub fn raw(text: &str) -> Box<RawValue> {
    RawValue::from_string(text.to_owned()).unwrap()
}

// ============================================================================
// Connection Drivers
// ============================================================================

/// Drives the hooks for an outgoing call the way a connection would:
/// request, write, read of the reply, response, done.
pub fn drive_call<H: Handler + ?Sized>(handler: &H, conn: &dyn Conn, id: Id) -> Context {
    let req = WireRequest::call(id.clone(), "textDocument/hover", Some(raw(r#"{"line":1}"#)));
    let cx = handler.request(Context::background(), conn, Direction::Send, &req);
    let cx = handler.wrote(cx, 64);
    let cx = handler.read(cx, 32);
    let resp = WireResponse::success(id, Some(raw("null")));
    let cx = handler.response(cx, conn, Direction::Receive, &resp);
    handler.done(&cx, None);
    cx
}

/// Drives the hooks for an outgoing notification: request, write, done.
pub fn drive_notification<H: Handler + ?Sized>(
    handler: &H,
    conn: &dyn Conn,
    method: &str,
) -> Context {
    let req = WireRequest::notification(method, None);
    let cx = handler.request(Context::background(), conn, Direction::Send, &req);
    let cx = handler.wrote(cx, 16);
    handler.done(&cx, None);
    cx
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Carrier value naming the message it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTag(pub Option<Id>);

/// Tags each carrier with its message id and checks the tag on the way out.
#[derive(Default)]
pub struct Tagger {
    pub mismatches: AtomicUsize,
    pub done: AtomicUsize,
}

impl Handler for Tagger {
    fn request(
        &self,
        cx: Context,
        _conn: &dyn Conn,
        _direction: Direction,
        req: &WireRequest,
    ) -> Context {
        cx.with(MessageTag(req.id.clone()))
    }

    fn response(
        &self,
        cx: Context,
        _conn: &dyn Conn,
        _direction: Direction,
        resp: &WireResponse,
    ) -> Context {
        if cx.get::<MessageTag>() != Some(&MessageTag(resp.id.clone())) {
            self.mismatches.fetch_add(1, Ordering::SeqCst);
        }
        cx
    }

    fn done(&self, cx: &Context, _err: Option<&DynError>) {
        if !cx.contains::<MessageTag>() {
            self.mismatches.fetch_add(1, Ordering::SeqCst);
        }
        self.done.fetch_add(1, Ordering::SeqCst);
    }
}

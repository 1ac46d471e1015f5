//! The identity handler.

use wirehook_core::Handler;

/// A handler that observes nothing and changes nothing.
///
/// Every carrier-returning hook hands back its input unchanged, `cancel`
/// returns `false`, and `done` and `error` do nothing. Use it where a
/// connection needs a handler but no instrumentation is wanted, or as the
/// neutral element when composing handlers.
///
/// Concrete handlers do not need to wrap it: the defaults of [`Handler`]
/// already provide the same behaviour for every hook they leave out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EmptyHandler;

impl Handler for EmptyHandler {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockConn;
    use wirehook_core::{Context, Direction, Id, RawValue, WireError, WireRequest, WireResponse};

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    fn raw(text: &str) -> Box<RawValue> {
        RawValue::from_string(text.to_owned()).unwrap()
    }

    #[test]
    fn test_request_and_response_are_identity() {
        let conn = MockConn::new();
        let requests = [
            WireRequest::call(1, "foo", Some(raw("[1,2]"))),
            WireRequest::call("abc", "bar", None),
            WireRequest::notification("exit", None),
        ];
        let responses = [
            WireResponse::success(1, Some(raw("null"))),
            WireResponse::failure(2, WireError::new(WireError::INTERNAL_ERROR, "boom")),
        ];

        for direction in [Direction::Send, Direction::Receive] {
            for req in &requests {
                let cx = Context::background().with(Marker(1));
                let out = EmptyHandler.request(cx.clone(), &conn, direction, req);
                assert!(out.ptr_eq(&cx));
            }
            for resp in &responses {
                let cx = Context::background().with(Marker(2));
                let out = EmptyHandler.response(cx.clone(), &conn, direction, resp);
                assert!(out.ptr_eq(&cx));
            }
        }
    }

    #[test]
    fn test_byte_counts_are_identity() {
        for bytes in [0, 1, 4096, u64::MAX] {
            let cx = Context::background().with(Marker(3));
            assert!(EmptyHandler.read(cx.clone(), bytes).ptr_eq(&cx));
            assert!(EmptyHandler.wrote(cx.clone(), bytes).ptr_eq(&cx));
        }
    }

    #[test]
    fn test_cancel_always_false() {
        let conn = MockConn::new();
        let cx = Context::background().cancelled();

        for id in [Id::from(0), Id::from(-5), Id::from(7), Id::from("call-1")] {
            for already_cancelled in [false, true] {
                assert!(!EmptyHandler.cancel(&cx, &conn, &id, already_cancelled));
            }
        }
        assert!(conn.sent().is_empty());
    }

    #[test]
    fn test_done_and_error_are_noops() {
        let err = std::io::Error::other("lost");
        let cx = Context::background();

        EmptyHandler.done(&cx, None);
        EmptyHandler.done(&cx, Some(&err));
        EmptyHandler.error(&cx, &err);
    }
}

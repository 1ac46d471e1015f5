use wirehook::{
    Context, Direction, EmptyHandler, Handler, HandlerStack, Id, Started, TracingHandler,
    Transferred, WireError, WireRequest, WireResponse,
    testing::{HookEvent, HookTrail, MockConn, RecordingHandler},
};

mod common;
use common::{MessageTag, Tagger, drive_call, drive_notification};

#[test]
fn test_call_lifecycle_order() {
    let recorder = RecordingHandler::new();
    let conn = MockConn::new();

    drive_call(&recorder, &conn, Id::from(1));

    assert_eq!(
        recorder.events(),
        vec![
            HookEvent::Request {
                direction: Direction::Send,
                method: "textDocument/hover".into(),
                id: Some(Id::from(1)),
            },
            HookEvent::Wrote { bytes: 64 },
            HookEvent::Read { bytes: 32 },
            HookEvent::Response {
                direction: Direction::Receive,
                id: Some(Id::from(1)),
                is_error: false,
            },
            HookEvent::Done {
                error: None,
                trail: vec![
                    "request".into(),
                    "wrote".into(),
                    "read".into(),
                    "response".into()
                ],
            },
        ]
    );
}

#[test]
fn test_notification_lifecycle() {
    let recorder = RecordingHandler::new();
    let conn = MockConn::new();

    let cx = drive_notification(&recorder, &conn, "initialized");

    assert_eq!(cx.get::<HookTrail>().unwrap().entries(), ["request", "wrote"]);
    assert!(matches!(
        recorder.events().last(),
        Some(HookEvent::Done { error: None, .. })
    ));
}

#[test]
fn test_state_flows_between_handlers() {
    let handler = TracingHandler::named("client")
        .chain(Tagger::default())
        .chain(RecordingHandler::new());
    let conn = MockConn::new();

    let cx = drive_call(&handler, &conn, Id::from("req-1"));

    assert_eq!(cx.get::<MessageTag>(), Some(&MessageTag(Some(Id::from("req-1")))));
    assert_eq!(cx.get::<Started>().unwrap().method(), Some("textDocument/hover"));
    assert_eq!(
        cx.get::<Transferred>(),
        Some(&Transferred {
            read: 32,
            written: 64
        })
    );
    let (first, _recorder) = handler.into_inner();
    let (_tracing, tagger) = first.into_inner();
    assert_eq!(tagger.mismatches.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn test_failed_done_is_distinguishable() {
    let recorder = RecordingHandler::new();
    let conn = MockConn::new();
    let req = WireRequest::call(5, "workspace/symbol", None);
    let resp = WireResponse::failure(5, WireError::new(WireError::INTERNAL_ERROR, "index busy"));

    let cx = recorder.request(Context::background(), &conn, Direction::Receive, &req);
    let cx = recorder.response(cx, &conn, Direction::Send, &resp);
    let err = std::io::Error::other("index busy");
    recorder.done(&cx, Some(&err));
    recorder.done(&Context::background(), None);

    let done: Vec<_> = recorder
        .events()
        .into_iter()
        .filter_map(|event| match event {
            HookEvent::Done { error, .. } => Some(error),
            _ => None,
        })
        .collect();
    assert_eq!(done, vec![Some("index busy".to_string()), None]);
}

#[test]
fn test_undeliverable_error_reaches_every_handler() {
    let first = RecordingHandler::new();
    let second = RecordingHandler::new();
    let stack = HandlerStack::builder()
        .register(first.clone())
        .register(EmptyHandler)
        .register(second.clone())
        .build();
    let err = std::io::Error::other("notification handler failed");

    stack.error(&Context::background(), &err);

    let expected = vec![HookEvent::Error {
        message: "notification handler failed".into(),
    }];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}

#[test]
fn test_empty_handler_in_chain_is_transparent() {
    let recorder = RecordingHandler::new();
    let handler = EmptyHandler.chain(recorder.clone()).chain(EmptyHandler);
    let conn = MockConn::new();

    let cx = drive_call(&handler, &conn, Id::from(2));

    assert_eq!(cx.get::<HookTrail>().unwrap().entries().len(), 4);
    assert_eq!(recorder.count(), 5);
}

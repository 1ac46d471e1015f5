//! # wirehook - Instrumentation Boundary for RPC Connections
//!
//! `wirehook` defines the hooks an RPC connection calls while it processes
//! messages, and ships a handful of handlers built on them. A connection owns
//! one [`Handler`]; everything observing or steering its traffic (logging,
//! tracing, cancellation forwarding) plugs in there.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirehook::prelude::*;
//!
//! // Trace every message and dump requests and responses to stderr.
//! let handler = TracingHandler::named("client")
//!     .chain(CancelNotifier::new())
//!     .chain(FileHandler::stderr());
//! # let _ = handler;
//! ```
//!
//! ## Writing a Handler
//!
//! Every hook has an identity or no-op default, so a handler overrides only
//! what it needs:
//!
//! ```rust
//! use wirehook::{Conn, Context, Direction, Handler, WireRequest};
//!
//! struct CountRequests(std::sync::atomic::AtomicU64);
//!
//! impl Handler for CountRequests {
//!     fn request(
//!         &self,
//!         cx: Context,
//!         _conn: &dyn Conn,
//!         _direction: Direction,
//!         _req: &WireRequest,
//!     ) -> Context {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         cx
//!     }
//! }
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use wirehook_core::{
    // Composition
    Chain,
    // Connection
    Conn,
    ConnError,
    ConnId,
    // Carrier
    Context,
    Direction,
    // Errors
    BoxError,
    DynError,
    // Contract
    Handler,
    // Wire shapes
    Id,
    RawValue,
    WireError,
    WireRequest,
    WireResponse,
};

pub use wirehook_std::{
    CANCEL_METHOD, CancelNotifier, EmptyHandler, FileHandler, HandlerStack, HandlerStackBuilder,
    SinkError, Started, TracingHandler, Transferred,
};

/// Diagnostic block formatting used by [`FileHandler`].
pub mod file {
    pub use wirehook_std::file::{request_block, response_block};
}

/// Testing utilities.
pub mod testing {
    pub use wirehook_std::testing::{
        HookEvent, HookTrail, MockConn, RecordingHandler, SentNotification, SharedBuf,
    };
}

/// Prelude module - common imports for wirehook.
///
/// # Usage
///
/// ```rust,ignore
/// use wirehook::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancelNotifier, Conn, Context, Direction, EmptyHandler, FileHandler, Handler,
        HandlerStack, Id, TracingHandler, WireRequest, WireResponse,
    };
}

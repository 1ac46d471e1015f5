//! # wirehook-std
//!
//! Standard handler implementations for the wirehook instrumentation boundary.
//!
//! This crate provides:
//! - **Defaults**: [`EmptyHandler`], the identity/no-op handler
//! - **Diagnostics**: [`FileHandler`] writes a flat block per request and response
//! - **Tracing**: [`TracingHandler`] emits `tracing` events and times each message
//! - **Cancellation**: [`CancelNotifier`] tells the peer about cancelled calls
//! - **Composition**: [`HandlerStack`] runs any number of handlers in order
//! - **Testing**: recording handler and mock connection in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use wirehook_core;

mod display;

pub mod cancel;
pub mod empty;
pub mod file;
pub mod stack;
pub mod testing;
pub mod trace;

pub use cancel::{CANCEL_METHOD, CancelNotifier};
pub use empty::EmptyHandler;
pub use file::{FileHandler, SinkError};
pub use stack::{HandlerStack, HandlerStackBuilder};
pub use trace::{Started, TracingHandler, Transferred};

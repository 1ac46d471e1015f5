//! # wirehook-core
//!
//! Core contract for instrumenting an RPC connection.
//!
//! A connection owns exactly one [`Handler`] and invokes it at seven points in
//! the life of every message it processes. This crate defines that contract
//! and the small set of types it is expressed in. It does not frame, parse or
//! transmit anything; the connection is an external collaborator reached only
//! through the [`Conn`] trait.
//!
//! # Building Blocks
//!
//! - [`Direction`] - whether a message is being sent or was received
//! - [`Context`] - the immutable per-message carrier threaded through hooks
//! - [`WireRequest`] / [`WireResponse`] / [`Id`] - read-only message shapes
//! - [`Conn`] - the connection handle passed to hooks
//! - [`Handler`] - the hook contract, with identity/no-op defaults
//! - [`Chain`] - static composition of two handlers
//!
//! # Message Lifecycle
//!
//! For a single message the connection calls `request` (or `response`)
//! first and `done` last. `read` and `wrote` may interleave with either once
//! the bytes they count have been attributed to the message. Each call
//! receives the carrier returned by the previous one for the same message.
//! `cancel` stands apart and fires only for outgoing calls.
//!
//! # Error Types
//!
//! - [`BoxError`] / [`DynError`] - errors reported to `done` and `error`
//! - [`ConnError`] - failures sending through a [`Conn`]
//! - [`WireError`] - the error object carried by a response

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod chain;
mod conn;
mod context;
mod direction;
mod error;
mod handler;
mod wire;

// Re-exports
pub use chain::Chain;
pub use conn::{Conn, ConnId};
pub use context::Context;
pub use direction::Direction;
pub use error::{BoxError, ConnError, DynError};
pub use handler::Handler;
pub use wire::{Id, WireError, WireRequest, WireResponse};

/// Raw JSON payload type used for params and results.
pub use serde_json::value::RawValue;

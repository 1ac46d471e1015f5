//! # Per-Message Carrier
//!
//! [`Context`] is the value a connection threads through the hooks of a single
//! message. Hooks never mutate it; they return a new carrier that extends the
//! one they were given, and the connection hands that to the next hook for the
//! same message.
//!
//! Values are keyed by their type. Extending a carrier with a value of a type
//! it already holds shadows the older value without touching any other
//! carrier that shares the same history.
//!
//! ```rust
//! use wirehook_core::Context;
//!
//! #[derive(Debug, PartialEq)]
//! struct TraceId(u64);
//!
//! let base = Context::background();
//! let traced = base.clone().with(TraceId(7));
//!
//! assert_eq!(traced.get::<TraceId>(), Some(&TraceId(7)));
//! assert!(base.get::<TraceId>().is_none());
//! ```

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

struct Node {
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Immutable, append-only bag of values describing one message.
///
/// Cloning is cheap: clones share structure through reference counting.
/// A `Context` is `Send + Sync`, so carriers for different messages can be
/// processed on different threads without coordination.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
    len: usize,
    cancelled: bool,
}

impl Context {
    /// An empty, non-cancelled carrier.
    ///
    /// This is also the carrier to use for out-of-band sends while handling a
    /// cancellation, since the carrier given to `cancel` is already cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a carrier holding everything in `self` plus `value`.
    ///
    /// A previous value of the same type is shadowed, not removed.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(self, value: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<T>(),
                value: Box::new(value),
                parent: self.head,
            })),
            len: self.len + 1,
            cancelled: self.cancelled,
        }
    }

    /// The most recently added value of type `T`, if any.
    pub fn get<T: Any>(&self) -> Option<&T> {
        let key = TypeId::of::<T>();
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            if node.key == key {
                return node.value.downcast_ref::<T>();
            }
            cursor = node.parent.as_deref();
        }
        None
    }

    /// Whether a value of type `T` has been added.
    pub fn contains<T: Any>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Number of values added, counting shadowed ones.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no values have been added.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Derives a carrier in cancelled state that keeps every value of `self`.
    #[must_use]
    pub fn cancelled(self) -> Self {
        Self {
            cancelled: true,
            ..self
        }
    }

    /// Whether this carrier is in cancelled state.
    ///
    /// A cancelled carrier must not be used to originate new outbound work.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether `self` and `other` are the same carrier, not merely equal ones.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        let same_head = match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_head && self.cancelled == other.cancelled
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("len", &self.len)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

//! Message direction tag.

use std::fmt;

/// Whether a message is leaving this side of the connection or arriving at it.
///
/// Every hook that concerns a message crossing the wire is annotated with a
/// `Direction`. The enum is closed: there is no third state to guard against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The message is outgoing; this side is transmitting it.
    Send,
    /// The message is incoming; this side received it.
    Receive,
}

impl Direction {
    /// Human-readable label: `"send"` or `"receive"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Send => "send",
            Direction::Receive => "receive",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Message shapes handed to hooks.
//!
//! These are supplied by the connection layer and are read-only from a
//! handler's point of view. Payloads are kept as raw JSON text; nothing in
//! this crate parses them.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;
use thiserror::Error;

/// Identifies a call. Notifications carry no `Id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// A numeric identifier.
    Number(i64),
    /// A string identifier.
    Name(String),
}

impl Id {
    /// The numeric form, if this is a numeric identifier.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Id::Number(n) => Some(*n),
            Id::Name(_) => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Id::Name(name.to_owned())
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Id::Name(name)
    }
}

/// A request or notification as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    /// The method being invoked.
    pub method: String,
    /// Raw parameter payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Box<RawValue>>,
    /// Present for calls, absent for notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
}

impl WireRequest {
    /// A call expecting a response.
    pub fn call(
        id: impl Into<Id>,
        method: impl Into<String>,
        params: Option<Box<RawValue>>,
    ) -> Self {
        Self {
            method: method.into(),
            params,
            id: Some(id.into()),
        }
    }

    /// A notification; no response is expected.
    pub fn notification(method: impl Into<String>, params: Option<Box<RawValue>>) -> Self {
        Self {
            method: method.into(),
            params,
            id: None,
        }
    }

    /// Whether this request carries no `Id`.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A response as it appears on the wire.
///
/// `id` is absent only when the peer could not determine which call failed
/// (for instance a parse error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    /// Raw result payload, absent on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<RawValue>>,
    /// Error object, absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
    /// The call this responds to.
    #[serde(default)]
    pub id: Option<Id>,
}

impl WireResponse {
    /// A successful response.
    pub fn success(id: impl Into<Id>, result: Option<Box<RawValue>>) -> Self {
        Self {
            result,
            error: None,
            id: Some(id.into()),
        }
    }

    /// A failed response.
    pub fn failure(id: impl Into<Id>, error: WireError) -> Self {
        Self {
            result: None,
            error: Some(error),
            id: Some(id.into()),
        }
    }

    /// Whether the response carries an error object.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The error object of a failed response.
///
/// Displays as its message.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[error("{message}")]
pub struct WireError {
    /// Numeric error code.
    pub code: i64,
    /// Short description.
    pub message: String,
    /// Additional raw payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}

impl WireError {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist or is not available.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal error.
    pub const INTERNAL_ERROR: i64 = -32603;

    /// Creates an error object without data.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> Box<RawValue> {
        RawValue::from_string(text.to_owned()).unwrap()
    }

    #[test]
    fn test_id_display() {
        assert_eq!(Id::from(7).to_string(), "7");
        assert_eq!(Id::from("abc").to_string(), "abc");
        assert_eq!(Id::from(7).as_number(), Some(7));
        assert_eq!(Id::from("abc").as_number(), None);
    }

    #[test]
    fn test_id_untagged_serde() {
        assert_eq!(serde_json::to_string(&Id::from(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Id::from("x")).unwrap(), "\"x\"");
        let id: Id = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(id, Id::Name("x".into()));
    }

    #[test]
    fn test_request_kinds() {
        let call = WireRequest::call(1, "initialize", Some(raw("{}")));
        assert!(!call.is_notification());
        assert_eq!(call.params.as_deref().map(RawValue::get), Some("{}"));

        let note = WireRequest::notification("exit", None);
        assert!(note.is_notification());
    }

    #[test]
    fn test_request_keeps_raw_params() {
        let req: WireRequest =
            serde_json::from_str(r#"{"method":"foo","params":{"a": [1, 2]},"id":9}"#).unwrap();
        assert_eq!(req.method, "foo");
        assert_eq!(req.params.as_deref().map(RawValue::get), Some(r#"{"a": [1, 2]}"#));
        assert_eq!(req.id, Some(Id::Number(9)));
    }

    #[test]
    fn test_wire_error_displays_message() {
        let err = WireError::new(WireError::METHOD_NOT_FOUND, "no such method");
        assert_eq!(err.to_string(), "no such method");

        let resp = WireResponse::failure(4, err);
        assert!(resp.is_error());
        assert!(resp.result.is_none());
    }
}

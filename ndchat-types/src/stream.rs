//! Streaming event types for incremental chat responses.
//!
//! The backend streams one JSON object per line:
//! ```text
//! {"type":"status","content":"Looking up the weather..."}
//! {"type":"status","content":"Searching hotels..."}
//! {"type":"response","content":"Here is what I found: ..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// One event from the NDJSON response stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Short progress description while the backend is still working.
    Status {
        /// Text shown in the placeholder, replacing any earlier status.
        content: String,
    },
    /// The final answer, markdown formatted.
    Response {
        /// Full message text.
        content: String,
    },
    /// A failure reported by the backend, markdown formatted.
    Error {
        /// Full message text.
        content: String,
    },
}

/// Minimal shape every line must have before it can be classified.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    content: String,
}

impl StreamEvent {
    /// Parse one complete NDJSON line.
    ///
    /// Fields other than `type` and `content` are ignored. Returns
    /// [`ChatError::MalformedEvent`] when the line is not an object with
    /// both fields as strings, and [`ChatError::UnknownEventType`] when
    /// `type` is not one of `status`, `response` or `error`.
    pub fn from_line(line: &str) -> Result<Self, ChatError> {
        let raw: RawEvent = serde_json::from_str(line).map_err(|e| ChatError::MalformedEvent {
            line: line.to_string(),
            reason: e.to_string(),
        })?;

        match raw.kind.as_str() {
            "status" => Ok(Self::Status {
                content: raw.content,
            }),
            "response" => Ok(Self::Response {
                content: raw.content,
            }),
            "error" => Ok(Self::Error {
                content: raw.content,
            }),
            _ => Err(ChatError::UnknownEventType(raw.kind)),
        }
    }

    /// The wire name of this event's kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Response { .. } => "response",
            Self::Error { .. } => "error",
        }
    }

    /// The event's payload.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Status { content } | Self::Response { content } | Self::Error { content } => {
                content
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status() {
        let event = StreamEvent::from_line(r#"{"type":"status","content":"A"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Status {
                content: "A".into()
            }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let event =
            StreamEvent::from_line(r#"{"type":"response","content":"Done","elapsed_ms":12}"#)
                .unwrap();
        assert_eq!(event.kind(), "response");
        assert_eq!(event.content(), "Done");
    }

    #[test]
    fn unknown_type_is_distinct_from_malformed() {
        let err = StreamEvent::from_line(r#"{"type":"tool_call","content":"x"}"#).unwrap_err();
        assert!(matches!(err, ChatError::UnknownEventType(k) if k == "tool_call"));
    }

    #[test]
    fn missing_content_is_malformed() {
        let err = StreamEvent::from_line(r#"{"type":"status"}"#).unwrap_err();
        assert!(matches!(err, ChatError::MalformedEvent { .. }));
    }

    #[test]
    fn non_string_content_is_malformed() {
        let err = StreamEvent::from_line(r#"{"type":"status","content":42}"#).unwrap_err();
        assert!(matches!(err, ChatError::MalformedEvent { .. }));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = StreamEvent::from_line("not-json").unwrap_err();
        match err {
            ChatError::MalformedEvent { line, .. } => assert_eq!(line, "not-json"),
            other => panic!("expected MalformedEvent, got: {other:?}"),
        }
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = StreamEvent::Error {
            content: "boom".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"type": "error", "content": "boom"}));
    }
}

//! Error types for a single chat request cycle.
//!
//! None of these are fatal to the process. Transport, status and response
//! failures end the cycle after one user-visible message; malformed or
//! unrecognized event lines are logged and skipped; blank input is a no-op.

/// Message shown when the backend cannot be reached or the connection drops.
pub const NETWORK_ERROR_MESSAGE: &str = "⚠️ Network error. Please check if the backend is running.";

/// Errors that can occur while running one request cycle.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    // Cycle-ending errors
    /// Connection failed, was refused, or broke while streaming.
    #[error("network error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The backend answered with a non-success status code.
    #[error("server returned HTTP {status}: {body}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, as text, for diagnostics.
        body: String,
    },
    /// A non-streaming response body could not be decoded.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    // Per-line errors, skipped without ending the cycle
    /// One NDJSON line was not a JSON object with string `type` and `content`.
    #[error("malformed event line {line:?}: {reason}")]
    MalformedEvent {
        /// The offending line.
        line: String,
        /// Why it was rejected.
        reason: String,
    },
    /// One NDJSON line carried a `type` this client does not know.
    #[error("unrecognized event type: {0}")]
    UnknownEventType(String),

    // No-ops and setup
    /// The user submitted blank input; no request is sent.
    #[error("empty input")]
    EmptyInput,
    /// Client configuration could not be built.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChatError {
    /// Whether this error terminates the current request cycle.
    #[must_use]
    pub fn is_cycle_fatal(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::InvalidResponse(_)
        )
    }

    /// The synthetic message rendered to the user for this error, if any.
    ///
    /// Only cycle-ending errors produce a message. A non-success status
    /// carries its numeric code.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Transport(_) | Self::InvalidResponse(_) => Some(NETWORK_ERROR_MESSAGE.to_string()),
            Self::HttpStatus { status, .. } => Some(format!("❌ Server Error: {status}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_carries_code() {
        let err = ChatError::HttpStatus {
            status: 503,
            body: r#"{"detail":"down"}"#.into(),
        };
        assert_eq!(err.user_message().as_deref(), Some("❌ Server Error: 503"));
        assert!(err.is_cycle_fatal());
    }

    #[test]
    fn transport_uses_network_message() {
        let err = ChatError::Transport("connection refused".into());
        assert_eq!(err.user_message().as_deref(), Some(NETWORK_ERROR_MESSAGE));
        assert!(err.is_cycle_fatal());
    }

    #[test]
    fn per_line_errors_are_silent() {
        let malformed = ChatError::MalformedEvent {
            line: "not-json".into(),
            reason: "expected value".into(),
        };
        assert!(malformed.user_message().is_none());
        assert!(!malformed.is_cycle_fatal());

        let unknown = ChatError::UnknownEventType("tool_call".into());
        assert!(unknown.user_message().is_none());
        assert!(!unknown.is_cycle_fatal());
    }

    #[test]
    fn empty_input_is_not_an_error_state() {
        assert!(ChatError::EmptyInput.user_message().is_none());
        assert!(!ChatError::EmptyInput.is_cycle_fatal());
    }
}

//! Request and non-streaming response types for the `/chat` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Model identifier sent when no model selector is present.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Session identifier sent when none is configured.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Text rendered when a legacy response carries no text.
pub const NO_TEXT_RESPONSE_MESSAGE: &str = "*Thinking...* (No text response)";

/// Everything needed to issue one chat request.
///
/// Immutable once built. Construction trims the message and rejects blank
/// input, so a `RequestContext` always holds something worth sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    message: String,
    session_id: String,
    model_name: String,
}

impl RequestContext {
    /// Build a context for `message`.
    ///
    /// Returns [`ChatError::EmptyInput`] when `message` is empty or only
    /// whitespace.
    pub fn new(
        message: &str,
        session_id: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        Ok(Self {
            message: message.to_string(),
            session_id: session_id.into(),
            model_name: model_name.into(),
        })
    }

    /// The trimmed user message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Opaque session identifier forwarded to the backend.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Model identifier forwarded to the backend.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The JSON body for this request.
    pub fn to_request(&self) -> ChatRequest<'_> {
        ChatRequest {
            message: &self.message,
            session_id: &self.session_id,
            model_name: &self.model_name,
        }
    }
}

/// `/chat` request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Non-empty user message.
    pub message: &'a str,
    /// Opaque session identifier.
    pub session_id: &'a str,
    /// Model identifier.
    pub model_name: &'a str,
}

/// Single-object `/chat` response used when the backend does not stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyResponse {
    /// The answer, if the backend produced any text.
    #[serde(default)]
    pub response: Option<String>,
}

impl LegacyResponse {
    /// Text to render: the answer, or a placeholder when it is null or empty.
    pub fn display_text(&self) -> &str {
        match self.response.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => NO_TEXT_RESPONSE_MESSAGE,
        }
    }
}

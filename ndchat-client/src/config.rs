//! Client configuration.

use std::time::Duration;

use ndchat_types::{ChatError, DEFAULT_MODEL, DEFAULT_SESSION_ID};

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "NDCHAT_BASE_URL";
/// Environment variable overriding [`ClientConfig::model_name`].
pub const ENV_MODEL: &str = "NDCHAT_MODEL";
/// Environment variable overriding [`ClientConfig::session_id`].
pub const ENV_SESSION_ID: &str = "NDCHAT_SESSION_ID";
/// Environment variable setting [`ClientConfig::request_timeout`], in seconds.
pub const ENV_TIMEOUT_SECS: &str = "NDCHAT_TIMEOUT_SECS";

/// How to read the `/chat` response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Pick by `Content-Type`: `application/json` is a single legacy object,
    /// anything else is treated as an NDJSON stream.
    #[default]
    Auto,
    /// Always NDJSON.
    Streaming,
    /// Always a single `{ "response": ... }` object.
    Legacy,
}

impl ResponseMode {
    /// Whether a response with this `Content-Type` should be read as a
    /// single legacy object.
    pub fn is_legacy(self, content_type: Option<&str>) -> bool {
        match self {
            Self::Streaming => false,
            Self::Legacy => true,
            Self::Auto => content_type
                .and_then(|ct| ct.split(';').next())
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json")),
        }
    }
}

/// Configuration for a [`ChatClient`](crate::ChatClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL; `/chat` and `/history` are appended.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model_name: String,
    /// Session identifier sent with every request.
    pub session_id: String,
    /// How to read responses.
    pub mode: ResponseMode,
    /// Per-request timeout. `None` waits indefinitely, so a hung backend
    /// stalls the cycle until cancelled.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model_name: DEFAULT_MODEL.into(),
            session_id: DEFAULT_SESSION_ID.into(),
            mode: ResponseMode::default(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `NDCHAT_*` environment variables.
    ///
    /// Unset or empty variables keep the default. Returns
    /// [`ChatError::Config`] when `NDCHAT_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(model) = var(ENV_MODEL) {
            config.model_name = model;
        }
        if let Some(session) = var(ENV_SESSION_ID) {
            config.session_id = session;
        }
        if let Some(secs) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                ChatError::Config(format!("{ENV_TIMEOUT_SECS}={secs:?} is not a number: {e}"))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

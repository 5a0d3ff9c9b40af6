//! Chat backend client struct and builder.

use std::time::Duration;

use ndchat_types::{ChatError, RequestContext};

use crate::config::{ClientConfig, ResponseMode};
use crate::error::{map_http_status, map_reqwest_error};

/// Client for a chat backend speaking the `/chat` NDJSON protocol.
///
/// # Example
///
/// ```no_run
/// use ndchat_client::ChatClient;
///
/// let client = ChatClient::new()
///     .base_url("http://localhost:8000")
///     .model("gemini-2.5-flash")
///     .session_id("user1");
/// ```
pub struct ChatClient {
    /// Endpoint, identity and response-mode settings.
    pub(crate) config: ClientConfig,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl ChatClient {
    /// Create a client with [`ClientConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    /// Create a client from an explicit configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Override the backend base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Override the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model_name = model.into();
        self
    }

    /// Override the session identifier.
    #[must_use]
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.config.session_id = session_id.into();
        self
    }

    /// Choose how responses are read.
    #[must_use]
    pub fn mode(mut self, mode: ResponseMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Apply a timeout to each request.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured [`reqwest::Client`] (proxies, TLS roots, ...).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a [`RequestContext`] for `text` with the configured session
    /// and model.
    ///
    /// Returns [`ChatError::EmptyInput`] for blank text.
    pub fn request_context(&self, text: &str) -> Result<RequestContext, ChatError> {
        RequestContext::new(text, &self.config.session_id, &self.config.model_name)
    }

    /// Send the request and return the response once headers arrive.
    ///
    /// Non-success statuses become [`ChatError::HttpStatus`] after the body
    /// has been read for diagnostics; the body itself is not streamed.
    pub async fn open(&self, ctx: &RequestContext) -> Result<reqwest::Response, ChatError> {
        let url = self.chat_url();

        tracing::debug!(
            url = %url,
            session_id = %ctx.session_id(),
            model = %ctx.model_name(),
            "sending chat request"
        );

        let mut request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&ctx.to_request());
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "chat request rejected");
            return Err(map_http_status(status, &body));
        }

        Ok(response)
    }

    /// Fetch the stored conversation for the configured session.
    ///
    /// The entries are returned as the backend sends them; this client does
    /// not interpret them.
    pub async fn history(&self) -> Result<Vec<serde_json::Value>, ChatError> {
        let url = self.history_url();
        tracing::debug!(url = %url, session_id = %self.config.session_id, "fetching history");

        let mut request = self
            .client
            .get(&url)
            .query(&[("session_id", self.config.session_id.as_str())]);
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(map_http_status(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ChatError::InvalidResponse(format!("history is not a JSON array: {e}")))
    }

    /// Build the chat endpoint URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the history endpoint URL.
    pub(crate) fn history_url(&self) -> String {
        format!("{}/history", self.config.base_url.trim_end_matches('/'))
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

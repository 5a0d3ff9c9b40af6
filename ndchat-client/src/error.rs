//! Internal error helpers for mapping HTTP/reqwest errors to [`ChatError`].

use ndchat_types::ChatError;

/// Map a non-success HTTP status to a [`ChatError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ChatError {
    ChatError::HttpStatus {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Map a [`reqwest::Error`] to a [`ChatError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        tracing::warn!(error = %err, "chat request timed out");
    }
    ChatError::Transport(Box::new(err))
}

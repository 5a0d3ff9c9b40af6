//! One request cycle: send a message and render the reply.
//!
//! Every failure is contained here. Transport and status errors end the
//! cycle after exactly one user-visible message; malformed lines are skipped
//! by the interpreter; blank input sends nothing and renders nothing.

use futures::StreamExt;
use ndchat_stream::{CycleStats, EventInterpreter, ndjson_lines};
use ndchat_types::{ChatError, LegacyResponse, Renderer, RequestContext};
use tokio_util::sync::CancellationToken;

use crate::client::ChatClient;
use crate::error::map_reqwest_error;

/// How a request cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Blank input; no request was sent.
    Skipped,
    /// The response was fully consumed.
    Completed(CycleStats),
    /// The cycle ended early; the error has already been rendered.
    Failed {
        /// What went wrong.
        error: ChatError,
        /// What had been rendered before the failure.
        stats: CycleStats,
    },
    /// The caller cancelled the cycle; nothing further was rendered.
    Cancelled(CycleStats),
}

impl CycleOutcome {
    /// Counters for the cycle, if a request was sent.
    pub fn stats(&self) -> Option<CycleStats> {
        match self {
            Self::Skipped => None,
            Self::Completed(stats) | Self::Cancelled(stats) => Some(*stats),
            Self::Failed { stats, .. } => Some(*stats),
        }
    }

    /// Whether the response was consumed to the end.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl ChatClient {
    /// Send `text` and render the reply into `renderer`.
    ///
    /// Blank input is ignored. The user's message is rendered before the
    /// request goes out.
    pub async fn send_message<R>(&self, text: &str, renderer: &mut R) -> CycleOutcome
    where
        R: Renderer + ?Sized,
    {
        self.send_message_with_cancel(text, renderer, &CancellationToken::new())
            .await
    }

    /// Like [`send_message`](Self::send_message), but stops reading when
    /// `cancel` fires.
    ///
    /// Use this to abandon a stream superseded by a newer message.
    pub async fn send_message_with_cancel<R>(
        &self,
        text: &str,
        renderer: &mut R,
        cancel: &CancellationToken,
    ) -> CycleOutcome
    where
        R: Renderer + ?Sized,
    {
        let ctx = match self.request_context(text) {
            Ok(ctx) => ctx,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring blank input");
                return CycleOutcome::Skipped;
            }
        };
        self.send_request(&ctx, renderer, cancel).await
    }

    /// Run one cycle for an already built request.
    ///
    /// Use this when the session or model differs from the client's
    /// configuration, e.g. when a model selector is present.
    pub async fn send_request<R>(
        &self,
        ctx: &RequestContext,
        renderer: &mut R,
        cancel: &CancellationToken,
    ) -> CycleOutcome
    where
        R: Renderer + ?Sized,
    {
        renderer.append_user_message(ctx.message());
        renderer.set_typing(true);

        let opened = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = self.open(ctx) => Some(result),
        };

        let response = match opened {
            None => {
                renderer.set_typing(false);
                tracing::debug!("request cancelled before response");
                return CycleOutcome::Cancelled(CycleStats::default());
            }
            Some(Err(error)) => {
                renderer.set_typing(false);
                return fail(renderer, error);
            }
            Some(Ok(response)) => response,
        };

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        if self.config.mode.is_legacy(content_type.as_deref()) {
            tracing::debug!(content_type = ?content_type, "reading single-object response");
            read_legacy(response, renderer, cancel).await
        } else {
            tracing::debug!(content_type = ?content_type, "reading NDJSON stream");
            renderer.set_typing(false);
            read_stream(response, renderer, cancel).await
        }
    }
}

/// Consume an NDJSON body, driving the interpreter line by line.
async fn read_stream<R>(
    response: reqwest::Response,
    renderer: &mut R,
    cancel: &CancellationToken,
) -> CycleOutcome
where
    R: Renderer + ?Sized,
{
    let mut interpreter = EventInterpreter::new(renderer);
    let mut lines = std::pin::pin!(ndjson_lines(response.bytes_stream()));

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("stream cancelled");
                return CycleOutcome::Cancelled(interpreter.finish());
            }
            next = lines.next() => next,
        };

        match next {
            Some(Ok(line)) => interpreter.handle_line(&line),
            Some(Err(err)) => {
                let error = map_reqwest_error(err);
                interpreter.report(&error);
                return CycleOutcome::Failed {
                    error,
                    stats: interpreter.finish(),
                };
            }
            None => break,
        }
    }

    CycleOutcome::Completed(interpreter.finish())
}

/// Consume a single `{ "response": ... }` body.
async fn read_legacy<R>(
    response: reqwest::Response,
    renderer: &mut R,
    cancel: &CancellationToken,
) -> CycleOutcome
where
    R: Renderer + ?Sized,
{
    let body = tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        body = response.text() => Some(body),
    };
    renderer.set_typing(false);

    let parsed = match body {
        None => {
            tracing::debug!("legacy response cancelled");
            return CycleOutcome::Cancelled(CycleStats::default());
        }
        Some(Err(err)) => Err(map_reqwest_error(err)),
        Some(Ok(text)) => serde_json::from_str::<LegacyResponse>(&text)
            .map_err(|e| ChatError::InvalidResponse(e.to_string())),
    };

    match parsed {
        Ok(legacy) => {
            renderer.append_final_message(legacy.display_text(), true);
            CycleOutcome::Completed(CycleStats {
                final_messages: 1,
                ..CycleStats::default()
            })
        }
        Err(error) => fail(renderer, error),
    }
}

/// Render the one user-visible message for `error` and end the cycle.
fn fail<R>(renderer: &mut R, error: ChatError) -> CycleOutcome
where
    R: Renderer + ?Sized,
{
    let mut interpreter = EventInterpreter::new(renderer);
    interpreter.report(&error);
    CycleOutcome::Failed {
        error,
        stats: interpreter.finish(),
    }
}

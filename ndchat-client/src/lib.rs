//! HTTP client for chat backends that stream NDJSON status updates.
//!
//! This crate sends one user message per request cycle to `POST /chat` and
//! renders the reply through a [`Renderer`]:
//!
//! ```no_run
//! use ndchat_client::ChatClient;
//! use ndchat_types::test_utils::RecordingRenderer;
//!
//! # async fn run() {
//! let client = ChatClient::new().base_url("http://localhost:8000");
//! let mut renderer = RecordingRenderer::new();
//! let outcome = client.send_message("Weather in Prague?", &mut renderer).await;
//! println!("{outcome:?}");
//! # }
//! ```
//!
//! # Features
//!
//! - NDJSON streaming with an in-place "thinking" placeholder
//! - Fallback to the single-object `{ "response": ... }` shape, selected by
//!   `Content-Type` or forced via [`ResponseMode`]
//! - Opt-in cancellation of an in-flight cycle
//! - Session history fetch from `GET /history`
//! - Configuration from code or `NDCHAT_*` environment variables

pub mod client;
pub mod config;
pub mod cycle;
pub mod error;

pub use client::ChatClient;
pub use config::{ClientConfig, ResponseMode};
pub use cycle::CycleOutcome;

// Re-export the pieces callers need alongside the client.
pub use ndchat_stream::CycleStats;
pub use ndchat_types::{ChatError, Renderer, RequestContext};
pub use tokio_util::sync::CancellationToken;

#![deny(missing_docs)]
//! # ndchat-types — shared vocabulary for the ndchat client
//!
//! Everything the streaming chat client exchanges with the backend or with
//! the UI layer lives here, with no HTTP or async runtime attached:
//!
//! | Module | What it holds |
//! |--------|---------------|
//! | [`stream`] | [`StreamEvent`], one parsed NDJSON line |
//! | [`types`] | [`RequestContext`], the outbound [`ChatRequest`] body, the legacy [`LegacyResponse`] shape |
//! | [`traits`] | [`Renderer`], the UI collaborator the interpreter drives |
//! | [`error`] | [`ChatError`], the failure taxonomy of one request cycle |
//!
//! The `test-utils` feature adds [`test_utils::RecordingRenderer`], an
//! in-memory [`Renderer`] that records every call for inspection.

pub mod error;
pub mod stream;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::*;
pub use stream::*;
pub use traits::*;
pub use types::*;

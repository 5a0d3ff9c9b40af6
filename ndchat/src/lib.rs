#![deny(missing_docs)]
//! # ndchat — umbrella crate
//!
//! Single import surface for the streaming chat client. The protocol types
//! and stream handling are always available; the HTTP client sits behind the
//! default `client` feature.

pub use ndchat_stream;
pub use ndchat_types;

#[cfg(feature = "client")]
pub use ndchat_client;

/// Happy-path imports.
pub mod prelude {
    pub use ndchat_stream::{ChunkReassembler, CycleStats, EventInterpreter, ndjson_lines};
    pub use ndchat_types::{ChatError, Renderer, RequestContext, StreamEvent};

    #[cfg(feature = "client")]
    pub use ndchat_client::{
        CancellationToken, ChatClient, ClientConfig, CycleOutcome, ResponseMode,
    };
}

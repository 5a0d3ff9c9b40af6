#![deny(missing_docs)]
//! Incremental NDJSON handling for streamed chat responses.
//!
//! Two stages, applied in order for every chunk the transport delivers:
//!
//! 1. [`ChunkReassembler`] turns raw byte chunks into complete text lines,
//!    carrying partial lines and split UTF-8 sequences between chunks.
//!    [`ndjson_lines`] wraps it around any byte stream.
//! 2. [`EventInterpreter`] parses each line into a
//!    [`StreamEvent`](ndchat_types::StreamEvent) and drives a
//!    [`Renderer`](ndchat_types::Renderer): open a placeholder on the first
//!    status, replace its text on later ones, finalize it on the response and
//!    append the final message.
//!
//! A malformed line never ends the stream; it is logged and counted.
//!
//! ```
//! use ndchat_stream::{ChunkReassembler, EventInterpreter};
//! use ndchat_types::test_utils::RecordingRenderer;
//!
//! let mut renderer = RecordingRenderer::new();
//! let mut reassembler = ChunkReassembler::new();
//! let mut interpreter = EventInterpreter::new(&mut renderer);
//!
//! for chunk in [&b"{\"type\":\"status\",\"con"[..], b"tent\":\"Working\"}\n"] {
//!     for line in reassembler.feed(chunk) {
//!         interpreter.handle_line(&line);
//!     }
//! }
//! let stats = interpreter.finish();
//! assert_eq!(stats.status_updates, 1);
//! ```

pub mod interpreter;
pub mod lines;
pub mod reassembler;

pub use interpreter::{CycleStats, EventInterpreter, PlaceholderPhase};
pub use lines::ndjson_lines;
pub use reassembler::ChunkReassembler;

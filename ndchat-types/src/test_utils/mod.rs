//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag.

mod recording_renderer;

pub use recording_renderer::{
    PlaceholderId, RecordedMessage, RecordedPlaceholder, RecordingRenderer, RenderOp,
};

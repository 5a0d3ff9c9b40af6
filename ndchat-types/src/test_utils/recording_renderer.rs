//! RecordingRenderer — keeps every render call in memory.

use crate::traits::Renderer;

/// Handle issued by [`RecordingRenderer::create_placeholder`].
///
/// Deliberately not `Clone`: the interpreter must hold the one handle it was
/// given.
#[derive(Debug, PartialEq, Eq)]
pub struct PlaceholderId(usize);

impl PlaceholderId {
    /// Index of this placeholder in [`RecordingRenderer::placeholders`].
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One call made against the renderer, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// `create_placeholder`, with the index it was given.
    CreatePlaceholder(usize),
    /// `update_placeholder`.
    UpdatePlaceholder {
        /// Placeholder index.
        index: usize,
        /// New text.
        content: String,
    },
    /// `finalize_placeholder`.
    FinalizePlaceholder(usize),
    /// `append_final_message`.
    FinalMessage {
        /// Message text.
        content: String,
        /// Whether rich text was requested.
        rich_text: bool,
    },
    /// `append_user_message`.
    UserMessage(String),
    /// `set_typing`.
    Typing(bool),
}

/// Current state of one placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedPlaceholder {
    /// Last displayed text.
    pub content: String,
    /// Number of `update_placeholder` calls.
    pub updates: usize,
    /// Whether `finalize_placeholder` was called.
    pub finalized: bool,
}

/// A message appended to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    /// Message text.
    pub content: String,
    /// `true` for assistant messages rendered as rich text.
    pub rich_text: bool,
    /// `true` when appended via `append_user_message`.
    pub from_user: bool,
}

/// A [`Renderer`] that records every call and the resulting UI state.
///
/// Updating or finalizing a placeholder that was already finalized panics,
/// so tests fail loudly if the interpreter touches a closed slot.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Every call, in order.
    pub ops: Vec<RenderOp>,
    /// Placeholders by creation index.
    pub placeholders: Vec<RecordedPlaceholder>,
    /// Appended messages, user and assistant, in order.
    pub messages: Vec<RecordedMessage>,
    /// Whether the typing indicator is currently shown.
    pub typing: bool,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assistant messages only, in order.
    pub fn final_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| !m.from_user)
            .map(|m| m.content.as_str())
            .collect()
    }

    /// User messages only, in order.
    pub fn user_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.from_user)
            .map(|m| m.content.as_str())
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    type Placeholder = PlaceholderId;

    fn create_placeholder(&mut self) -> PlaceholderId {
        let index = self.placeholders.len();
        self.placeholders.push(RecordedPlaceholder::default());
        self.ops.push(RenderOp::CreatePlaceholder(index));
        PlaceholderId(index)
    }

    fn update_placeholder(&mut self, placeholder: &PlaceholderId, content: &str) {
        let slot = &mut self.placeholders[placeholder.0];
        assert!(!slot.finalized, "update on finalized placeholder {}", placeholder.0);
        slot.content = content.to_string();
        slot.updates += 1;
        self.ops.push(RenderOp::UpdatePlaceholder {
            index: placeholder.0,
            content: content.to_string(),
        });
    }

    fn finalize_placeholder(&mut self, placeholder: PlaceholderId) {
        let slot = &mut self.placeholders[placeholder.0];
        assert!(!slot.finalized, "placeholder {} finalized twice", placeholder.0);
        slot.finalized = true;
        self.ops.push(RenderOp::FinalizePlaceholder(placeholder.0));
    }

    fn append_final_message(&mut self, content: &str, rich_text: bool) {
        self.messages.push(RecordedMessage {
            content: content.to_string(),
            rich_text,
            from_user: false,
        });
        self.ops.push(RenderOp::FinalMessage {
            content: content.to_string(),
            rich_text,
        });
    }

    fn append_user_message(&mut self, text: &str) {
        self.messages.push(RecordedMessage {
            content: text.to_string(),
            rich_text: false,
            from_user: true,
        });
        self.ops.push(RenderOp::UserMessage(text.to_string()));
    }

    fn set_typing(&mut self, visible: bool) {
        self.typing = visible;
        self.ops.push(RenderOp::Typing(visible));
    }
}

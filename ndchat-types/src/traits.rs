//! The rendering collaborator driven by the event interpreter.

/// UI surface that a request cycle renders into.
///
/// Implemented by the presentation layer (DOM, terminal, TUI, ...). The core
/// only calls these methods; how messages look, how markdown is rendered and
/// which marker shows a placeholder as in-progress or finished is entirely up
/// to the implementation.
///
/// # Placeholders
///
/// A placeholder is the "thinking" slot shown while the backend reports
/// progress. [`create_placeholder`](Renderer::create_placeholder) returns a
/// typed handle that the caller keeps for the rest of the cycle; there is no
/// lookup by identifier. [`finalize_placeholder`](Renderer::finalize_placeholder)
/// takes the handle by value, so a finalized placeholder cannot be updated
/// again.
pub trait Renderer {
    /// Handle to one placeholder slot.
    type Placeholder;

    /// Open a new, empty in-progress placeholder.
    fn create_placeholder(&mut self) -> Self::Placeholder;

    /// Replace the placeholder's displayed text with `content`.
    ///
    /// The placeholder is still in progress and should look like it.
    fn update_placeholder(&mut self, placeholder: &Self::Placeholder, content: &str);

    /// Move the placeholder to its finished look, keeping its last text.
    fn finalize_placeholder(&mut self, placeholder: Self::Placeholder);

    /// Append a standalone assistant message.
    ///
    /// `rich_text` asks for markdown-equivalent formatting.
    fn append_final_message(&mut self, content: &str, rich_text: bool);

    /// Append the user's own message, as plain text.
    fn append_user_message(&mut self, text: &str);

    /// Show or hide the typing indicator while a request is in flight.
    fn set_typing(&mut self, _visible: bool) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Placeholder = R::Placeholder;

    fn create_placeholder(&mut self) -> Self::Placeholder {
        (**self).create_placeholder()
    }

    fn update_placeholder(&mut self, placeholder: &Self::Placeholder, content: &str) {
        (**self).update_placeholder(placeholder, content);
    }

    fn finalize_placeholder(&mut self, placeholder: Self::Placeholder) {
        (**self).finalize_placeholder(placeholder);
    }

    fn append_final_message(&mut self, content: &str, rich_text: bool) {
        (**self).append_final_message(content, rich_text);
    }

    fn append_user_message(&mut self, text: &str) {
        (**self).append_user_message(text);
    }

    fn set_typing(&mut self, visible: bool) {
        (**self).set_typing(visible);
    }
}

//! Event interpretation: from NDJSON lines to renderer calls.
//!
//! The placeholder moves through `Absent → Pending → Finalized`. A new
//! request cycle builds a new [`EventInterpreter`], so it always starts
//! `Absent` and never sees a handle from an earlier cycle.
//!
//! | Event | Placeholder absent | Placeholder pending | Finalized |
//! |-------|--------------------|---------------------|-----------|
//! | `status` | create, show text | replace text | ignored |
//! | `response` | append message | finalize, append message | append message |
//! | `error` | append message | append message (placeholder left open) | append message |
//!
//! `response` and `error` are terminal: once either has arrived, the
//! placeholder is frozen for the rest of the cycle. An `error` leaves an open
//! placeholder in progress; only a `response` that is the first terminal
//! event finalizes it.

use ndchat_types::{ChatError, Renderer, StreamEvent};

/// Where the cycle's placeholder currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPhase {
    /// No status has arrived yet.
    Absent,
    /// Showing the latest status.
    Pending,
    /// A response closed the slot; no further mutation.
    Finalized,
}

enum Placeholder<H> {
    Absent,
    Pending(H),
    Finalized,
}

/// Counters for one request cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Placeholders opened (0 or 1).
    pub placeholders_created: usize,
    /// Status events shown in the placeholder.
    pub status_updates: usize,
    /// Messages appended via `append_final_message`.
    pub final_messages: usize,
    /// Lines that failed to parse.
    pub malformed_lines: usize,
    /// Well-formed lines with an unknown `type`.
    pub unrecognized_events: usize,
}

/// Drives a [`Renderer`] from the events of a single request cycle.
pub struct EventInterpreter<'r, R: Renderer + ?Sized> {
    renderer: &'r mut R,
    placeholder: Placeholder<R::Placeholder>,
    terminated: bool,
    stats: CycleStats,
}

impl<'r, R: Renderer + ?Sized> EventInterpreter<'r, R> {
    /// Start a cycle with no placeholder.
    pub fn new(renderer: &'r mut R) -> Self {
        Self {
            renderer,
            placeholder: Placeholder::Absent,
            terminated: false,
            stats: CycleStats::default(),
        }
    }

    /// Parse one complete line and apply it.
    ///
    /// Malformed lines and unknown event types are logged and skipped.
    pub fn handle_line(&mut self, line: &str) {
        match StreamEvent::from_line(line) {
            Ok(event) => self.apply(event),
            Err(ChatError::UnknownEventType(kind)) => {
                self.stats.unrecognized_events += 1;
                tracing::warn!(kind = %kind, "dropping event with unrecognized type");
            }
            Err(err) => {
                self.stats.malformed_lines += 1;
                tracing::warn!(error = %err, "skipping malformed event line");
            }
        }
    }

    /// Apply an already parsed event.
    pub fn apply(&mut self, event: StreamEvent) {
        tracing::trace!(kind = event.kind(), "applying stream event");
        match event {
            StreamEvent::Status { content } => self.show_status(&content),
            StreamEvent::Response { content } => {
                if self.terminated {
                    tracing::debug!("placeholder frozen, appending response only");
                } else {
                    self.close_placeholder();
                }
                self.terminated = true;
                self.append(&content);
            }
            StreamEvent::Error { content } => {
                self.terminated = true;
                self.append(&content);
            }
        }
    }

    /// Render the user-visible message for a cycle-ending failure.
    ///
    /// Errors that do not end the cycle are only logged. A fatal error
    /// freezes the placeholder like a terminal event.
    pub fn report(&mut self, err: &ChatError) {
        if !err.is_cycle_fatal() {
            tracing::debug!(error = %err, "not reporting non-fatal error");
            return;
        }
        tracing::warn!(error = %err, "request cycle failed");
        self.terminated = true;
        if let Some(message) = err.user_message() {
            self.append(&message);
        }
    }

    /// Current placeholder phase.
    pub fn phase(&self) -> PlaceholderPhase {
        match self.placeholder {
            Placeholder::Absent => PlaceholderPhase::Absent,
            Placeholder::Pending(_) => PlaceholderPhase::Pending,
            Placeholder::Finalized => PlaceholderPhase::Finalized,
        }
    }

    /// Whether a `response` or `error` event has ended the cycle.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Counters so far.
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// End the cycle and release the renderer.
    ///
    /// A placeholder still pending stays as it is; the renderer decides how
    /// an unfinished slot looks.
    pub fn finish(self) -> CycleStats {
        if matches!(self.placeholder, Placeholder::Pending(_)) {
            tracing::debug!("stream ended with placeholder still pending");
        }
        tracing::debug!(
            status_updates = self.stats.status_updates,
            final_messages = self.stats.final_messages,
            malformed_lines = self.stats.malformed_lines,
            unrecognized_events = self.stats.unrecognized_events,
            "request cycle finished"
        );
        self.stats
    }

    fn show_status(&mut self, content: &str) {
        if self.terminated {
            tracing::debug!(content, "ignoring status after terminal event");
            return;
        }
        match &self.placeholder {
            Placeholder::Absent => {
                let handle = self.renderer.create_placeholder();
                self.renderer.update_placeholder(&handle, content);
                self.placeholder = Placeholder::Pending(handle);
                self.stats.placeholders_created += 1;
            }
            Placeholder::Pending(handle) => {
                self.renderer.update_placeholder(handle, content);
            }
            Placeholder::Finalized => return,
        }
        self.stats.status_updates += 1;
    }

    fn close_placeholder(&mut self) {
        if let Placeholder::Pending(handle) =
            std::mem::replace(&mut self.placeholder, Placeholder::Finalized)
        {
            self.renderer.finalize_placeholder(handle);
        }
    }

    fn append(&mut self, content: &str) {
        self.renderer.append_final_message(content, true);
        self.stats.final_messages += 1;
    }
}

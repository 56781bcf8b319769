//! Transcript renderer: owns the history and keeps the view in step with it.

use time::OffsetDateTime;

use crate::render::format::render_body;
use crate::transcript::{EntryId, Sender, Transcript};
use crate::view::{RenderedEntry, TranscriptView};
use crate::widgets::ThinkingIndicator;

pub struct Renderer<V> {
    transcript: Transcript,
    view: V,
    thinking: Option<ThinkingIndicator>,
    input_enabled: bool,
}

impl<V: TranscriptView> Renderer<V> {
    pub fn new(view: V) -> Self {
        Self {
            transcript: Transcript::new(),
            view,
            thinking: None,
            input_enabled: false,
        }
    }

    /// Records an entry and draws it below every earlier entry, then scrolls to it.
    pub fn append(
        &mut self,
        text: impl Into<String>,
        sender: Sender,
        timestamp: OffsetDateTime,
    ) -> EntryId {
        let entry = self.transcript.push(text, sender, timestamp);
        let rendered = RenderedEntry {
            id: entry.id(),
            sender,
            timestamp,
            body: render_body(entry.text(), sender),
        };
        self.view.append_entry(&rendered);
        self.view.scroll_to_latest();
        rendered.id
    }

    /// Disables input and shows a fresh thinking line.
    pub fn start_thinking(&mut self) {
        self.set_input_enabled(false);
        let indicator = ThinkingIndicator::default();
        self.view.show_thinking(&indicator.text());
        self.view.scroll_to_latest();
        self.thinking = Some(indicator);
    }

    /// Advances the ellipsis. No-op when nothing is in flight.
    pub fn tick_thinking(&mut self) {
        if let Some(indicator) = self.thinking.as_mut() {
            indicator.advance();
            self.view.update_thinking(&indicator.text());
        }
    }

    pub fn stop_thinking(&mut self) {
        if self.thinking.take().is_some() {
            self.view.remove_thinking();
        }
    }

    pub fn enable_input(&mut self) {
        self.set_input_enabled(true);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.view.set_input_enabled(enabled);
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    pub fn show_notice(&mut self, text: &str) {
        self.view.show_notice(text);
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

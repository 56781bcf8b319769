//! Display seam between the renderer and whatever draws the transcript.

use time::OffsetDateTime;

use crate::render::frame::EntryBody;
use crate::transcript::{EntryId, Sender};

/// An entry ready to draw: formatting already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub id: EntryId,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
    pub body: EntryBody,
}

/// Calls arrive in display order. `append_entry` must place the entry after
/// every entry appended before it.
pub trait TranscriptView {
    fn append_entry(&mut self, entry: &RenderedEntry);

    /// Shows the transient thinking line below the newest entry.
    fn show_thinking(&mut self, text: &str);

    fn update_thinking(&mut self, text: &str);

    fn remove_thinking(&mut self);

    fn set_input_enabled(&mut self, enabled: bool);

    fn scroll_to_latest(&mut self);

    /// Out-of-band text that is not part of the transcript, such as command help.
    fn show_notice(&mut self, _text: &str) {}
}

//! Append-only conversation history.

use time::OffsetDateTime;

/// Who produced an entry. Drives styling and whether text is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Assistant,
    Error,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Assistant",
            Self::Error => "Error",
        }
    }
}

/// Position of an entry in its transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    id: EntryId,
    text: String,
    sender: Sender,
    timestamp: OffsetDateTime,
}

impl TranscriptEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// Entries are only ever appended; ids follow insertion order.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        text: impl Into<String>,
        sender: Sender,
        timestamp: OffsetDateTime,
    ) -> &TranscriptEntry {
        let id = EntryId(self.entries.len());
        self.entries.push(TranscriptEntry {
            id,
            text: text.into(),
            sender,
            timestamp,
        });
        &self.entries[id.0]
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&TranscriptEntry> {
        self.entries.get(id.0)
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn entries_keep_insertion_order() {
        let mut transcript = Transcript::new();
        let at = datetime!(2024-05-01 09:30:00 UTC);

        let first = transcript.push("hello", Sender::User, at).id();
        let second = transcript.push("hi there", Sender::Assistant, at).id();

        assert!(first < second);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.get(first).map(|e| e.text()), Some("hello"));
        assert_eq!(transcript.last().map(|e| e.sender()), Some(Sender::Assistant));
    }

    #[test]
    fn sender_labels() {
        assert_eq!(Sender::User.label(), "You");
        assert_eq!(Sender::Assistant.label(), "Assistant");
        assert_eq!(Sender::Error.label(), "Error");
    }
}

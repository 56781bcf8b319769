//! Thinking indicator shown while a dispatch is in flight.
//!
//! The indicator owns no timer. Whoever drives the dispatch calls [`advance`]
//! once per interval, so dropping the indicator is all it takes to stop it.
//!
//! [`advance`]: ThinkingIndicator::advance

const DOT_FRAMES: usize = 4;
const DEFAULT_LABEL: &str = "Thinking";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinkingIndicator {
    label: String,
    dots: usize,
}

impl Default for ThinkingIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl ThinkingIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dots: 0,
        }
    }

    /// Moves to the next frame: 0, 1, 2, 3 dots, then back to 0.
    pub fn advance(&mut self) {
        self.dots = (self.dots + 1) % DOT_FRAMES;
    }

    pub fn dots(&self) -> usize {
        self.dots
    }

    pub fn text(&self) -> String {
        format!("{}{}", self.label, ".".repeat(self.dots))
    }
}

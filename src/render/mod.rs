//! Entry formatting and terminal styling.

pub mod ansi;
pub mod format;
pub mod frame;
pub mod wrap;

pub use format::{format_assistant_text, render_body};
pub use frame::{EntryBody, Line, Paragraph, Span, SpanStyle};

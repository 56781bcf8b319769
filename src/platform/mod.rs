//! Platform-specific terminal integrations.

pub mod terminal_view;

pub use terminal_view::{terminal_width, TerminalView};

//! Line-oriented transcript view over a byte sink, usually stdout.
//!
//! Entries are appended below everything already printed, so the terminal's own
//! scrollback keeps the newest entry in view. The thinking line is the only
//! thing ever rewritten in place.

use std::env;
use std::io::{self, Stdout, Write};

use crate::render::ansi::{render_entry_lines, DIM, RESET};
use crate::view::{RenderedEntry, TranscriptView};

pub const FALLBACK_WIDTH: usize = 80;
pub const PROMPT: &str = "> ";

const CLEAR_LINE: &str = "\r\x1b[2K";
const CURSOR_UP: &str = "\x1b[1A";

pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
    interactive: bool,
    width: Option<usize>,
    thinking_visible: bool,
    prompt_shown: bool,
}

impl TerminalView<Stdout> {
    /// Stdout view. Colour and in-place rewrites are used only on a terminal,
    /// and colour is also disabled by `NO_COLOR`.
    pub fn stdout() -> Self {
        let interactive = stdout_is_terminal();
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self::new(io::stdout(), interactive && !no_color, interactive)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool, interactive: bool) -> Self {
        Self {
            out,
            color,
            interactive,
            width: None,
            thinking_visible: false,
            prompt_shown: false,
        }
    }

    /// Fixes the wrap width instead of querying the terminal.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width.max(1));
        self
    }

    pub fn width(&self) -> usize {
        self.width.unwrap_or_else(terminal_width)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_str(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::warn!(error = %err, "failed to flush terminal");
        }
    }

    /// Erases the submitted input line the terminal echoed above the cursor.
    fn clear_echo(&mut self) {
        if self.prompt_shown && self.interactive {
            self.write_str(CURSOR_UP);
            self.write_str(CLEAR_LINE);
        }
        self.prompt_shown = false;
    }

    fn clear_thinking(&mut self) {
        if self.thinking_visible {
            if self.interactive {
                self.write_str(CLEAR_LINE);
            }
            self.thinking_visible = false;
        }
    }

    fn draw_thinking(&mut self, text: &str) {
        if !self.interactive {
            return;
        }
        let line = if self.color {
            format!("{CLEAR_LINE}{DIM}{text}{RESET}")
        } else {
            format!("{CLEAR_LINE}{text}")
        };
        self.write_str(&line);
        self.thinking_visible = true;
        self.flush();
    }
}

impl<W: Write> TranscriptView for TerminalView<W> {
    fn append_entry(&mut self, entry: &RenderedEntry) {
        self.clear_echo();
        self.clear_thinking();
        let mut block = render_entry_lines(entry, self.width(), self.color).join("\n");
        block.push_str("\n\n");
        self.write_str(&block);
    }

    fn show_thinking(&mut self, text: &str) {
        self.clear_echo();
        self.draw_thinking(text);
    }

    fn update_thinking(&mut self, text: &str) {
        if self.thinking_visible {
            self.draw_thinking(text);
        }
    }

    fn remove_thinking(&mut self) {
        self.clear_thinking();
        self.flush();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled {
            if self.interactive {
                self.write_str(PROMPT);
            }
            self.prompt_shown = true;
            self.flush();
        } else {
            self.clear_echo();
        }
    }

    fn scroll_to_latest(&mut self) {
        self.flush();
    }

    fn show_notice(&mut self, text: &str) {
        self.prompt_shown = false;
        self.clear_thinking();
        let mut block = text.to_string();
        block.push('\n');
        self.write_str(&block);
        self.flush();
    }
}

#[cfg(unix)]
fn stdout_is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}

#[cfg(not(unix))]
fn stdout_is_terminal() -> bool {
    false
}

#[cfg(unix)]
fn read_winsize(fd: libc::c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

/// Current stdout column count, or [`FALLBACK_WIDTH`].
#[cfg(unix)]
pub fn terminal_width() -> usize {
    read_winsize(libc::STDOUT_FILENO)
        .map(|(columns, _)| usize::from(columns))
        .unwrap_or(FALLBACK_WIDTH)
}

#[cfg(not(unix))]
pub fn terminal_width() -> usize {
    FALLBACK_WIDTH
}

//! Terminal styling for transcript entries.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::render::frame::{EntryBody, Span, SpanStyle};
use crate::render::wrap::wrap_spans;
use crate::transcript::Sender;
use crate::view::RenderedEntry;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

const TAB_SPACES: &str = "   ";
const BODY_INDENT: &str = "  ";
const ESC: char = '\x1b';
const BEL: char = '\x07';

pub fn sender_color(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "\x1b[36m",
        Sender::Assistant => "\x1b[32m",
        Sender::Error => "\x1b[31m",
    }
}

/// Removes escape sequences and control characters from untrusted text.
///
/// Newlines survive and tabs become spaces. CSI and OSC sequences are dropped
/// whole so no parameter bytes leak into the output.
pub fn sanitize_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESC => match chars.peek().copied() {
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            },
            '\n' => out.push('\n'),
            '\t' => out.push_str(TAB_SPACES),
            ch if ch.is_control() => {}
            ch => out.push(ch),
        }
    }
    out
}

pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

pub fn entry_header(entry: &RenderedEntry, color: bool) -> String {
    let label = entry.sender.label();
    let time = format_timestamp(entry.timestamp);
    if color {
        format!(
            "{BOLD}{}{label}{RESET} {DIM}· {time}{RESET}",
            sender_color(entry.sender)
        )
    } else {
        format!("{label} · {time}")
    }
}

fn style_span(span: &Span, color: bool) -> String {
    match (span.style(), color) {
        (SpanStyle::Emphasis, true) if !span.as_str().is_empty() => {
            format!("{BOLD}{}{RESET}", span.as_str())
        }
        _ => span.as_str().to_string(),
    }
}

fn push_wrapped(lines: &mut Vec<String>, spans: &[Span], width: usize, color: bool) {
    for row in wrap_spans(spans, width) {
        let mut line = String::from(BODY_INDENT);
        for span in &row {
            line.push_str(&style_span(span, color));
        }
        lines.push(line.trim_end().to_string());
    }
}

/// Terminal lines for one entry: a header, then the body indented and wrapped.
pub fn render_entry_lines(entry: &RenderedEntry, width: usize, color: bool) -> Vec<String> {
    let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);
    let mut lines = vec![entry_header(entry, color)];

    match &entry.body {
        EntryBody::Literal(text) => {
            for source_line in sanitize_literal(text).split('\n') {
                push_wrapped(&mut lines, &[Span::plain(source_line)], body_width, color);
            }
        }
        EntryBody::Formatted(paragraphs) => {
            for (index, paragraph) in paragraphs.iter().enumerate() {
                if index > 0 {
                    lines.push(String::new());
                }
                for line in paragraph.lines() {
                    push_wrapped(&mut lines, line.spans(), body_width, color);
                }
            }
        }
    }
    lines
}

//! Lightweight formatting for assistant replies.
//!
//! Supported forms: `#` heading lines, `**emphasis**`, `- ` bullet lines, and
//! blank-line paragraph breaks. Everything else is plain text. Only assistant
//! entries are formatted; user and error text stays literal.

use crate::render::ansi::sanitize_literal;
use crate::render::frame::{EntryBody, Line, Paragraph, Span, SpanStyle};
use crate::transcript::Sender;

pub const BULLET_GLYPH: &str = "• ";
const EMPHASIS_MARKER: &str = "**";

/// Body for an entry from `sender`. Assistant text is sanitized before it is
/// formatted; literal bodies are sanitized when drawn.
pub fn render_body(text: &str, sender: Sender) -> EntryBody {
    match sender {
        Sender::Assistant => EntryBody::Formatted(format_assistant_text(&sanitize_literal(text))),
        Sender::User | Sender::Error => EntryBody::Literal(text.to_string()),
    }
}

pub fn format_assistant_text(text: &str) -> Vec<Paragraph> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(|chunk| chunk.trim_matches('\n'))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| Paragraph::new(chunk.split('\n').map(format_line).collect()))
        .collect()
}

fn format_line(line: &str) -> Line {
    if line.starts_with('#') {
        let heading = line.trim_start_matches('#').trim_start();
        let spans = inline_spans(heading)
            .into_iter()
            .map(|span| Span::emphasis(span.as_str()))
            .collect();
        return Line::new(spans);
    }

    if let Some(rest) = line.strip_prefix("- ") {
        let mut spans = vec![Span::new(BULLET_GLYPH, SpanStyle::Bullet)];
        spans.extend(inline_spans(rest));
        return Line::new(spans);
    }

    Line::new(inline_spans(line))
}

/// Splits `text` on matched `**` pairs. An unmatched marker stays literal.
fn inline_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(open) = rest.find(EMPHASIS_MARKER) {
        let after_open = &rest[open + EMPHASIS_MARKER.len()..];
        let Some(close) = after_open.find(EMPHASIS_MARKER) else {
            break;
        };

        plain.push_str(&rest[..open]);
        if !plain.is_empty() {
            spans.push(Span::plain(std::mem::take(&mut plain)));
        }
        let emphasized = &after_open[..close];
        if !emphasized.is_empty() {
            spans.push(Span::emphasis(emphasized));
        }
        rest = &after_open[close + EMPHASIS_MARKER.len()..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(Span::plain(plain));
    }
    spans
}

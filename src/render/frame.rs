//! Typed body model for transcript entries.
//!
//! Formatting produces structure, never markup: a body is either literal text or
//! paragraphs of styled spans. The terminal view decides how each style looks.

/// Styling applied to a run of text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpanStyle {
    #[default]
    Plain,
    Emphasis,
    /// List marker prefix.
    Bullet,
}

/// A contiguous run of text with one style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Span {
    text: String,
    style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Emphasis)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> SpanStyle {
        self.style
    }
}

/// A single source line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::as_str).collect()
    }
}

impl From<Vec<Span>> for Line {
    fn from(spans: Vec<Span>) -> Self {
        Self::new(spans)
    }
}

/// Lines separated from neighbouring paragraphs by a blank line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Paragraph {
    lines: Vec<Line>,
}

impl Paragraph {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

/// What the view draws for one entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryBody {
    /// Displayed exactly as written; markup characters stay visible.
    Literal(String),
    Formatted(Vec<Paragraph>),
}

impl EntryBody {
    /// Body text with all styling dropped.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Formatted(paragraphs) => paragraphs
                .iter()
                .map(|paragraph| {
                    paragraph
                        .lines()
                        .iter()
                        .map(Line::plain_text)
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

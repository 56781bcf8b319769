//! Width-aware word wrapping over styled spans.

use unicode_width::UnicodeWidthChar;

use crate::render::frame::{Span, SpanStyle};

pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

pub fn visible_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    style: SpanStyle,
    width: usize,
    is_space: bool,
}

/// Wraps one line of spans into rows no wider than `width` columns.
///
/// Breaks at spaces where possible; a word wider than a full row is split by
/// columns. Wrapped rows never start with whitespace. An empty line yields one
/// empty row.
pub fn wrap_spans(spans: &[Span], width: usize) -> Vec<Vec<Span>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<Token>> = vec![Vec::new()];
    let mut row_width = 0;

    for token in tokenize(spans) {
        if token.is_space {
            if row_width == 0 && rows.len() > 1 {
                continue;
            }
            if row_width + token.width <= width {
                row_width += token.width;
                push_token(rows.last_mut(), token);
            } else {
                rows.push(Vec::new());
                row_width = 0;
            }
            continue;
        }

        if row_width + token.width <= width {
            row_width += token.width;
            push_token(rows.last_mut(), token);
            continue;
        }

        if row_width > 0 {
            trim_trailing_space(rows.last_mut());
            rows.push(Vec::new());
            row_width = 0;
        }

        if token.width <= width {
            row_width = token.width;
            push_token(rows.last_mut(), token);
            continue;
        }

        for piece in break_long_word(&token, width) {
            if row_width > 0 {
                rows.push(Vec::new());
            }
            row_width = piece.width;
            push_token(rows.last_mut(), piece);
        }
    }

    rows.into_iter().map(merge_tokens).collect()
}

fn tokenize(spans: &[Span]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for span in spans {
        let mut current = String::new();
        let mut current_is_space = false;
        for ch in span.as_str().chars() {
            let is_space = ch == ' ';
            if !current.is_empty() && is_space != current_is_space {
                tokens.push(make_token(std::mem::take(&mut current), span.style(), current_is_space));
            }
            current_is_space = is_space;
            current.push(ch);
        }
        if !current.is_empty() {
            tokens.push(make_token(current, span.style(), current_is_space));
        }
    }
    tokens
}

fn make_token(text: String, style: SpanStyle, is_space: bool) -> Token {
    let width = visible_width(&text);
    Token {
        text,
        style,
        width,
        is_space,
    }
}

fn break_long_word(token: &Token, width: usize) -> Vec<Token> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in token.text.chars() {
        let w = char_width(ch);
        if current_width + w > width && !current.is_empty() {
            pieces.push(make_token(std::mem::take(&mut current), token.style, false));
            current_width = 0;
        }
        current.push(ch);
        current_width += w;
    }
    if !current.is_empty() {
        pieces.push(make_token(current, token.style, false));
    }
    pieces
}

fn push_token(row: Option<&mut Vec<Token>>, token: Token) {
    if let Some(row) = row {
        row.push(token);
    }
}

fn trim_trailing_space(row: Option<&mut Vec<Token>>) {
    if let Some(row) = row {
        while row.last().is_some_and(|token| token.is_space) {
            row.pop();
        }
    }
}

/// Joins adjacent tokens of the same style back into spans.
fn merge_tokens(row: Vec<Token>) -> Vec<Span> {
    let mut spans: Vec<(String, SpanStyle)> = Vec::new();
    for token in row {
        match spans.last_mut() {
            Some((text, style)) if *style == token.style => text.push_str(&token.text),
            _ => spans.push((token.text, token.style)),
        }
    }
    spans
        .into_iter()
        .map(|(text, style)| Span::new(text, style))
        .collect()
}

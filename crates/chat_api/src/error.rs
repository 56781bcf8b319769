use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

/// Construction and request-building failures. These never cross the
/// dispatcher boundary at send time; they surface while wiring the client.
#[derive(Debug)]
pub enum ChatApiError {
    InvalidOrigin(String),
    InvalidHeader(String),
    Client(reqwest::Error),
}

impl fmt::Display for ChatApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrigin(value) => {
                write!(f, "invalid origin (expected http:// or https:// URL): {value}")
            }
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Client(error) => write!(f, "HTTP client error: {error}"),
        }
    }
}

impl std::error::Error for ChatApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Client(error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, reset before a response.
    Connect,
    Timeout,
    /// Response body could not be read.
    Body,
    Other,
}

/// A transport-level failure: no HTTP status was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Body => "body read failed",
            TransportErrorKind::Other => "transport error",
        };
        write!(f, "{kind}: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() || error.is_request() {
            TransportErrorKind::Connect
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Human-readable detail for a non-2xx response.
///
/// Prefers the `{"error": string}` field, then the raw body, then the status
/// line.
pub fn parse_error_detail(status: u16, body: &str) -> String {
    if let Ok(ErrorPayload { error: Some(error) }) = serde_json::from_str::<ErrorPayload>(body) {
        if !error.trim().is_empty() {
            return error;
        }
    }

    let body = body.trim();
    if body.is_empty() || body.starts_with('{') {
        return status_line(status);
    }
    body.to_string()
}

fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
    {
        Some(reason) => format!("HTTP {status} {reason}"),
        None => format!("HTTP {status}"),
    }
}

//! Transport and dispatch primitives for the chat endpoint.
//!
//! This crate owns request building, the bounded retry loop, outcome
//! classification and the startup health probe. It has no rendering or terminal
//! coupling; callers turn a [`DispatchOutcome`] into transcript entries.
//!
//! Wire contract:
//! - `POST {origin}/api/chat` with `{"message": ...}` and `X-Session-ID`
//! - `GET {origin}/api/health`, any 2xx is healthy

pub mod classify;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod dispatch;
pub mod error;
pub mod headers;
pub mod health;
pub mod payload;
pub mod retry;
pub mod transport;
pub mod url;

pub use classify::FailureCategory;
pub use client::ChatApiClient;
pub use config::ChatApiConfig;
pub use connectivity::{AlwaysOnline, Connectivity, SystemConnectivity};
pub use dispatch::{
    ChatMessage, DispatchFailure, DispatchOutcome, Dispatcher, MALFORMED_REPLY_NOTICE,
};
pub use error::{ChatApiError, TransportError, TransportErrorKind};
pub use health::{probe_health, HealthStatus, HEALTH_WARNING};
pub use payload::ChatRequest;
pub use retry::{RetryPolicy, Sleep, TokioSleep};
pub use transport::{ChatTransport, HttpReply};
pub use url::{chat_endpoint, health_endpoint, validate_origin};

use std::future::Future;

use crate::error::TransportError;
use crate::payload::ChatRequest;

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// One network attempt against the chat backend. Implementations perform
/// exactly one outbound call per invocation and never retry.
pub trait ChatTransport {
    fn post_chat(
        &self,
        request: &ChatRequest,
        session_id: &str,
    ) -> impl Future<Output = Result<HttpReply, TransportError>>;

    fn get_health(&self) -> impl Future<Output = Result<HttpReply, TransportError>>;
}

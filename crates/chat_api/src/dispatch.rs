//! One logical send: bounded retry over a [`ChatTransport`], then
//! classification into a [`DispatchOutcome`]. Every path resolves to an
//! outcome; nothing is raised past this boundary.

use crate::classify::{classify_failure, FailureCategory, FailureCause};
use crate::connectivity::{Connectivity, SystemConnectivity};
use crate::error::{parse_error_detail, TransportError};
use crate::payload::{parse_reply_body, ChatRequest, ReplyBody};
use crate::retry::{is_retryable_status, RetryPolicy, Sleep, TokioSleep};
use crate::transport::{ChatTransport, HttpReply};

/// A user message that is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage(String);

impl ChatMessage {
    /// `None` for empty or whitespace-only input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub category: FailureCategory,
    pub detail: String,
    pub attempts: u32,
}

impl DispatchFailure {
    pub fn user_message(&self) -> String {
        self.category.user_message(&self.detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success { reply: String },
    /// 2xx without a usable `response` field.
    MalformedReply,
    Failure(DispatchFailure),
}

/// Fallback notice for [`DispatchOutcome::MalformedReply`].
pub const MALFORMED_REPLY_NOTICE: &str =
    "The assistant sent an empty response. Please try rephrasing your message.";

pub struct Dispatcher<T, S = TokioSleep> {
    transport: T,
    sleeper: S,
    connectivity: Box<dyn Connectivity>,
    policy: RetryPolicy,
    session_id: String,
}

impl<T, S> Dispatcher<T, S>
where
    T: ChatTransport,
    S: Sleep,
{
    pub fn new(transport: T, sleeper: S, session_id: impl Into<String>) -> Self {
        Self {
            transport,
            sleeper,
            connectivity: Box::new(SystemConnectivity::default()),
            policy: RetryPolicy::default(),
            session_id: session_id.into(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_connectivity(mut self, connectivity: impl Connectivity + 'static) -> Self {
        self.connectivity = Box::new(connectivity);
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send(&self, message: &ChatMessage) -> DispatchOutcome {
        let request = ChatRequest::new(message.as_str());
        let (result, attempts) = self.send_with_retry(&request).await;
        let outcome = self.settle(result, attempts);
        match &outcome {
            DispatchOutcome::Success { .. } => {
                tracing::info!(attempts, "dispatch succeeded");
            }
            DispatchOutcome::MalformedReply => {
                tracing::warn!(attempts, "dispatch returned no reply field");
            }
            DispatchOutcome::Failure(failure) => {
                tracing::warn!(
                    attempts,
                    category = %failure.category,
                    detail = %failure.detail,
                    "dispatch failed"
                );
            }
        }
        outcome
    }

    /// Returns the last result and the number of attempts made.
    async fn send_with_retry(&self, request: &ChatRequest) -> (Result<HttpReply, TransportError>, u32) {
        let mut attempt = 1;
        loop {
            let result = self.transport.post_chat(request, &self.session_id).await;
            let retryable = match &result {
                Ok(reply) => is_retryable_status(reply.status),
                Err(_) => true,
            };

            if !retryable || !self.policy.allows_another(attempt) {
                return (result, attempt);
            }

            match &result {
                Ok(reply) => tracing::debug!(attempt, status = reply.status, "retrying after server error"),
                Err(error) => tracing::debug!(attempt, %error, "retrying after transport failure"),
            }
            self.sleeper.sleep(self.policy.delay).await;
            attempt += 1;
        }
    }

    fn settle(&self, result: Result<HttpReply, TransportError>, attempts: u32) -> DispatchOutcome {
        match result {
            Ok(reply) if reply.is_success() => match parse_reply_body(&reply.body) {
                Ok(ReplyBody::Reply(text)) if !text.trim().is_empty() => {
                    DispatchOutcome::Success { reply: text }
                }
                Ok(_) => DispatchOutcome::MalformedReply,
                Err(error) => {
                    let message = format!("invalid response body: {error}");
                    self.fail(FailureCause::Other(&message), attempts)
                }
            },
            Ok(reply) => {
                let detail = parse_error_detail(reply.status, &reply.body);
                self.fail(
                    FailureCause::Status {
                        status: reply.status,
                        detail: &detail,
                    },
                    attempts,
                )
            }
            Err(error) => self.fail(FailureCause::Transport(&error), attempts),
        }
    }

    fn fail(&self, cause: FailureCause<'_>, attempts: u32) -> DispatchOutcome {
        let online = self.connectivity.is_online();
        DispatchOutcome::Failure(DispatchFailure {
            category: classify_failure(online, &cause),
            detail: cause.detail(),
            attempts,
        })
    }
}

//! The chat widget: one explicit context tying dispatch, rendering and time.

use std::time::Duration;

use chat_api::{
    probe_health, ChatMessage, ChatTransport, DispatchOutcome, Dispatcher, HealthStatus,
    MALFORMED_REPLY_NOTICE, HEALTH_WARNING,
};

use crate::config::THINKING_INTERVAL_MS;
use crate::renderer::Renderer;
use crate::scheduler::Scheduler;
use crate::transcript::{Sender, Transcript};
use crate::view::TranscriptView;

/// What a call to [`ChatWidget::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Blank input. Nothing was recorded or sent.
    Ignored,
    Settled(DispatchOutcome),
}

pub struct ChatWidget<T, S, V> {
    dispatcher: Dispatcher<T, S>,
    renderer: Renderer<V>,
    scheduler: S,
    thinking_interval: Duration,
}

impl<T, S, V> ChatWidget<T, S, V>
where
    T: ChatTransport,
    S: Scheduler,
    V: TranscriptView,
{
    /// The scheduler must be the one the dispatcher sleeps on, so one clock
    /// drives both retry delays and the thinking indicator.
    pub fn new(dispatcher: Dispatcher<T, S>, scheduler: S, view: V) -> Self {
        Self {
            dispatcher,
            renderer: Renderer::new(view),
            scheduler,
            thinking_interval: Duration::from_millis(THINKING_INTERVAL_MS),
        }
    }

    pub fn with_thinking_interval(mut self, interval: Duration) -> Self {
        self.thinking_interval = interval;
        self
    }

    /// Opens the input for the first message.
    pub fn start(&mut self) {
        self.renderer.enable_input();
    }

    /// Probes the health endpoint once. A failed probe adds one error entry and
    /// does not block later sends.
    pub async fn probe_health(&mut self) -> HealthStatus {
        let status = probe_health(self.dispatcher.transport()).await;
        if !status.is_healthy() {
            self.renderer
                .append(HEALTH_WARNING, Sender::Error, self.scheduler.now());
        }
        status
    }

    /// Sends one user message and records the outcome.
    ///
    /// The user entry is appended first. Input stays disabled and the thinking
    /// line animates until the dispatch settles; the thinking line is removed
    /// before the outcome entry is appended, and input reopens after it.
    pub async fn submit(&mut self, input: &str) -> SubmitResult {
        let Some(message) = ChatMessage::new(input) else {
            return SubmitResult::Ignored;
        };

        self.renderer
            .append(message.as_str(), Sender::User, self.scheduler.now());
        self.renderer.start_thinking();

        let outcome = {
            let dispatch = self.dispatcher.send(&message);
            tokio::pin!(dispatch);
            loop {
                tokio::select! {
                    biased;
                    outcome = &mut dispatch => break outcome,
                    _ = self.scheduler.sleep(self.thinking_interval) => {
                        self.renderer.tick_thinking();
                    }
                }
            }
        };

        self.renderer.stop_thinking();
        let (text, sender) = outcome_entry(&outcome);
        self.renderer.append(text, sender, self.scheduler.now());
        self.renderer.enable_input();

        SubmitResult::Settled(outcome)
    }

    pub fn session_id(&self) -> &str {
        self.dispatcher.session_id()
    }

    pub fn transcript(&self) -> &Transcript {
        self.renderer.transcript()
    }

    pub fn is_input_enabled(&self) -> bool {
        self.renderer.is_input_enabled()
    }

    pub fn show_notice(&mut self, text: &str) {
        self.renderer.show_notice(text);
    }

    /// Reopens input after out-of-band output such as a command notice.
    pub fn reopen_input(&mut self) {
        self.renderer.enable_input();
    }

    pub fn renderer(&self) -> &Renderer<V> {
        &self.renderer
    }

    pub fn dispatcher(&self) -> &Dispatcher<T, S> {
        &self.dispatcher
    }
}

fn outcome_entry(outcome: &DispatchOutcome) -> (String, Sender) {
    match outcome {
        DispatchOutcome::Success { reply } => (reply.clone(), Sender::Assistant),
        DispatchOutcome::MalformedReply => (MALFORMED_REPLY_NOTICE.to_string(), Sender::Assistant),
        DispatchOutcome::Failure(failure) => (failure.user_message(), Sender::Error),
    }
}

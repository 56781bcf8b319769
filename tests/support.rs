#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use chat_api::{ChatRequest, ChatTransport, Dispatcher, HttpReply, TransportError};
use chat_widget::{
    ChatWidget, EntryBody, ManualScheduler, RenderedEntry, Sender, TranscriptView,
};
use time::macros::datetime;
use time::OffsetDateTime;

pub type Scripted = Result<HttpReply, TransportError>;

pub const SESSION_ID: &str = "session_widget_test";

pub fn start_time() -> OffsetDateTime {
    datetime!(2024-05-01 09:30:00 UTC)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Entry {
        sender: Sender,
        text: String,
        timestamp: OffsetDateTime,
    },
    ShowThinking(String),
    UpdateThinking(String),
    RemoveThinking,
    InputEnabled(bool),
    Scroll,
    Notice(String),
}

#[derive(Debug, Default)]
pub struct ViewLog {
    pub events: Vec<ViewEvent>,
    pub bodies: Vec<EntryBody>,
    pub input_enabled: bool,
}

/// View that records every call into a log shared with the test.
#[derive(Clone, Default)]
pub struct RecordingView {
    pub log: Rc<RefCell<ViewLog>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.log.borrow().events.clone()
    }

    pub fn entries(&self) -> Vec<(Sender, String)> {
        self.log
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Entry { sender, text, .. } => Some((*sender, text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn bodies(&self) -> Vec<EntryBody> {
        self.log.borrow().bodies.clone()
    }
}

impl TranscriptView for RecordingView {
    fn append_entry(&mut self, entry: &RenderedEntry) {
        let mut log = self.log.borrow_mut();
        log.events.push(ViewEvent::Entry {
            sender: entry.sender,
            text: entry.body.plain_text(),
            timestamp: entry.timestamp,
        });
        log.bodies.push(entry.body.clone());
    }

    fn show_thinking(&mut self, text: &str) {
        self.log
            .borrow_mut()
            .events
            .push(ViewEvent::ShowThinking(text.to_string()));
    }

    fn update_thinking(&mut self, text: &str) {
        self.log
            .borrow_mut()
            .events
            .push(ViewEvent::UpdateThinking(text.to_string()));
    }

    fn remove_thinking(&mut self) {
        self.log.borrow_mut().events.push(ViewEvent::RemoveThinking);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        let mut log = self.log.borrow_mut();
        log.input_enabled = enabled;
        log.events.push(ViewEvent::InputEnabled(enabled));
    }

    fn scroll_to_latest(&mut self) {
        self.log.borrow_mut().events.push(ViewEvent::Scroll);
    }

    fn show_notice(&mut self, text: &str) {
        self.log
            .borrow_mut()
            .events
            .push(ViewEvent::Notice(text.to_string()));
    }
}

/// Transport replaying a script. Each chat reply can be held pending for a
/// number of polls to let the thinking indicator tick.
#[derive(Default)]
pub struct ScriptedTransport {
    chat: RefCell<VecDeque<(usize, Scripted)>>,
    health: RefCell<VecDeque<Scripted>>,
    pub chat_calls: Cell<usize>,
    pub health_calls: Cell<usize>,
    /// Input state seen by the view at the moment of each chat call.
    pub input_enabled_at_call: RefCell<Vec<bool>>,
    view_log: Option<Rc<RefCell<ViewLog>>>,
}

impl ScriptedTransport {
    pub fn new(view: &RecordingView) -> Self {
        Self {
            view_log: Some(Rc::clone(&view.log)),
            ..Self::default()
        }
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.reply_after(0, status, body)
    }

    pub fn reply_after(self, pending_polls: usize, status: u16, body: &str) -> Self {
        self.chat
            .borrow_mut()
            .push_back((pending_polls, Ok(HttpReply::new(status, body))));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.chat.borrow_mut().push_back((0, Err(error)));
        self
    }

    pub fn health(self, result: Scripted) -> Self {
        self.health.borrow_mut().push_back(result);
        self
    }
}

impl ChatTransport for ScriptedTransport {
    fn post_chat(
        &self,
        _request: &ChatRequest,
        _session_id: &str,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        self.chat_calls.set(self.chat_calls.get() + 1);
        if let Some(log) = &self.view_log {
            self.input_enabled_at_call
                .borrow_mut()
                .push(log.borrow().input_enabled);
        }
        let (pending_polls, result) = self
            .chat
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| (0, Ok(HttpReply::new(500, r#"{"error":"script exhausted"}"#))));
        PendingFor {
            remaining: pending_polls,
            result: Some(result),
        }
    }

    fn get_health(&self) -> impl Future<Output = Result<HttpReply, TransportError>> {
        self.health_calls.set(self.health_calls.get() + 1);
        let result = self
            .health
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpReply::new(200, "{}")));
        PendingFor {
            remaining: 0,
            result: Some(result),
        }
    }
}

/// Resolves after being polled `remaining` extra times.
struct PendingFor {
    remaining: usize,
    result: Option<Scripted>,
}

impl Future for PendingFor {
    type Output = Scripted;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Scripted> {
        if self.remaining > 0 {
            self.remaining -= 1;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        match self.result.take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Ready(Err(TransportError::connect("polled after completion"))),
        }
    }
}

pub type TestWidget = ChatWidget<ScriptedTransport, ManualScheduler, RecordingView>;

pub fn widget(
    build: impl FnOnce(ScriptedTransport) -> ScriptedTransport,
) -> (TestWidget, RecordingView, ManualScheduler) {
    let view = RecordingView::default();
    let scheduler = ManualScheduler::new(start_time());
    let transport = build(ScriptedTransport::new(&view));
    let dispatcher = Dispatcher::new(transport, scheduler.clone(), SESSION_ID)
        .with_connectivity(|| true);
    let widget = ChatWidget::new(dispatcher, scheduler.clone(), view.clone());
    (widget, view, scheduler)
}

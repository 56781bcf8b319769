//! Terminal chat widget.
//!
//! A user message goes through [`ChatWidget::submit`]: the message is recorded,
//! input is disabled while a thinking line animates, the dispatch runs with
//! bounded retries, and exactly one outcome entry is appended before input
//! reopens. Transport and classification live in `chat_api`; this crate owns
//! the transcript, formatting and the terminal view.
//!
//! # Public API Overview
//! - [`ChatWidget`] ties a [`chat_api::Dispatcher`], a [`Renderer`] and a [`Scheduler`].
//! - [`TranscriptView`] is the display seam; [`TerminalView`] draws to stdout.
//! - [`WidgetConfig`] reads the `CHAT_WIDGET_*` environment.

pub mod config;
pub mod logging;
pub mod platform;
pub mod render;
pub mod renderer;
pub mod scheduler;
pub mod transcript;
pub mod view;
pub mod widget;
pub mod widgets;

pub use crate::config::{ConfigError, WidgetConfig};
pub use crate::logging::init_logging;
pub use crate::platform::TerminalView;
pub use crate::render::{format_assistant_text, render_body, EntryBody, Line, Paragraph, Span, SpanStyle};
pub use crate::renderer::Renderer;
pub use crate::scheduler::{ManualScheduler, Scheduler, TokioScheduler};
pub use crate::transcript::{EntryId, Sender, Transcript, TranscriptEntry};
pub use crate::view::{RenderedEntry, TranscriptView};
pub use crate::widget::{ChatWidget, SubmitResult};
pub use crate::widgets::ThinkingIndicator;

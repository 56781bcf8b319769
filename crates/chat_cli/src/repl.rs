//! Line loop feeding stdin into the widget.

use std::io;

use chat_api::ChatTransport;
use chat_widget::{ChatWidget, Scheduler, SubmitResult, TranscriptView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::{parse_slash_command, SlashCommand, HELP_TEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Continue,
    Quit,
}

/// Handles one input line: a local command, or a message for the backend.
pub async fn handle_line<T, S, V>(widget: &mut ChatWidget<T, S, V>, line: &str) -> LineAction
where
    T: ChatTransport,
    S: Scheduler,
    V: TranscriptView,
{
    let notice = match parse_slash_command(line) {
        Some(SlashCommand::Quit) => return LineAction::Quit,
        Some(SlashCommand::Help) => HELP_TEXT.to_string(),
        Some(SlashCommand::Session) => format!("session: {}", widget.session_id()),
        Some(SlashCommand::Unknown(command)) => {
            format!("unknown command {command}; type /help for the list")
        }
        None => {
            if widget.submit(line).await == SubmitResult::Ignored {
                widget.reopen_input();
            }
            return LineAction::Continue;
        }
    };

    widget.show_notice(&notice);
    widget.reopen_input();
    LineAction::Continue
}

/// Reads lines until EOF or `/quit`.
pub async fn run<T, S, V, R>(widget: &mut ChatWidget<T, S, V>, reader: R) -> io::Result<()>
where
    T: ChatTransport,
    S: Scheduler,
    V: TranscriptView,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if handle_line(widget, &line).await == LineAction::Quit {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
    tracing::info!("input closed");
    Ok(())
}

use std::io;

use chat_api::{ChatApiClient, Dispatcher};
use chat_cli::repl;
use chat_cli::session::resolve_session_id;
use chat_widget::{init_logging, ChatWidget, TerminalView, TokioScheduler, WidgetConfig};
use tokio::io::BufReader;

fn main() -> io::Result<()> {
    // Read before any runtime or resolver thread exists.
    let scheduler = TokioScheduler::local();
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run_widget(scheduler))
}

async fn run_widget(scheduler: TokioScheduler) -> io::Result<()> {
    let config = WidgetConfig::from_env().map_err(io::Error::other)?;
    init_logging(config.log_path.as_deref())?;

    let session_id = resolve_session_id(&config);
    tracing::info!(origin = %config.origin, %session_id, "starting chat widget");

    let client = ChatApiClient::new(config.api_config()).map_err(io::Error::other)?;
    let dispatcher = Dispatcher::new(client, scheduler, session_id).with_policy(config.retry);

    let mut widget = ChatWidget::new(dispatcher, scheduler, TerminalView::stdout())
        .with_thinking_interval(config.thinking_interval);

    widget.probe_health().await;
    widget.start();

    repl::run(&mut widget, BufReader::new(tokio::io::stdin())).await
}

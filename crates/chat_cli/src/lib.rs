//! Terminal host for the chat widget.
//!
//! ## Configuration
//!
//! Everything is read from the environment at startup:
//!
//! - `CHAT_WIDGET_ORIGIN` backend origin, default `http://127.0.0.1:8000`
//! - `CHAT_WIDGET_MAX_ATTEMPTS`, `CHAT_WIDGET_RETRY_DELAY_MS` retry policy
//! - `CHAT_WIDGET_THINKING_INTERVAL_MS` ellipsis step
//! - `CHAT_WIDGET_TIMEOUT_SEC` optional per-attempt timeout
//! - `CHAT_WIDGET_STATE_DIR`, `CHAT_WIDGET_TAB_ID` session identity storage
//! - `CHAT_WIDGET_LOG` log file; `RUST_LOG` filter
//!
//! Each terminal tab keeps its own session id across runs. Storage failures
//! fall back to an in-memory session for the life of the process.

pub mod commands;
pub mod repl;
pub mod session;

//! Diagnostic logging.
//!
//! The transcript owns the terminal, so log records never go to stdout. They are
//! written to the file named by `CHAT_WIDGET_LOG`, or discarded when it is unset.
//! `RUST_LOG` filters as usual and defaults to `info`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Returns `true` when records go to a file.
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(log_path: Option<&Path>) -> io::Result<bool> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_path {
        Some(path) => {
            let file = open_log_file(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            Ok(true)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
            Ok(false)
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

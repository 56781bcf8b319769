//! Per-tab session identity for the host process.

use std::path::PathBuf;
use std::time::Duration;

use chat_widget::WidgetConfig;
use session_store::{
    default_state_root, default_tab_key, default_tab_owner, get_or_create_session_id, FileTabStorage, MemoryStorage,
    TabStorage,
};
use time::OffsetDateTime;

/// Tab records untouched for this long belong to closed tabs.
pub const STALE_TAB_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// File storage for this tab, or process memory when no state directory is
/// usable.
pub fn open_tab_storage(config: &WidgetConfig) -> Box<dyn TabStorage> {
    let Some(state_root) = state_root(config) else {
        tracing::warn!("no state directory available; session id will not persist");
        return Box::new(MemoryStorage::new());
    };
    // An explicit tab id is trusted as is; a pid-derived key is bound to its owner.
    let (tab_key, owner) = match &config.tab_key {
        Some(key) => (key.clone(), None),
        None => (default_tab_key(), default_tab_owner()),
    };

    match FileTabStorage::new(&state_root, &tab_key) {
        Ok(storage) => {
            let storage = storage.with_owner(owner);
            tracing::debug!(path = %storage.path().display(), "using tab storage");
            match FileTabStorage::prune_stale(&state_root, STALE_TAB_AGE, storage.path()) {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "pruned stale tab records"),
                Err(err) => tracing::warn!(error = %err, "could not prune stale tab records"),
            }
            Box::new(storage)
        }
        Err(err) => {
            tracing::warn!(error = %err, "tab storage unavailable; session id will not persist");
            Box::new(MemoryStorage::new())
        }
    }
}

fn state_root(config: &WidgetConfig) -> Option<PathBuf> {
    config.state_root.clone().or_else(default_state_root)
}

pub fn resolve_session_id(config: &WidgetConfig) -> String {
    let storage = open_tab_storage(config);
    get_or_create_session_id(storage.as_ref(), OffsetDateTime::now_utc())
}

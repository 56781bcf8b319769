//! Tab-scoped key/value storage and the per-tab session identifier.
//!
//! A "tab" is the terminal tab the client runs in. Its storage outlives a single
//! client process but is keyed by the tab, so a fresh tab starts empty.

mod error;
mod identity;
mod paths;
mod schema;
mod storage;

pub use error::SessionStoreError;
pub use identity::{generate_session_id, get_or_create_session_id, SESSION_ID_KEY};
pub use paths::{default_state_root, default_tab_key, default_tab_owner, tab_file_name, tab_root};
pub use schema::TabRecord;
pub use storage::{FileTabStorage, MemoryStorage, TabStorage};

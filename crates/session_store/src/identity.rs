use time::OffsetDateTime;
use uuid::Uuid;

use crate::storage::TabStorage;

/// Storage key holding the tab's session identifier.
pub const SESSION_ID_KEY: &str = "chat_session_id";

const RANDOM_LEN: usize = 9;

/// `session_<random>_<unix millis>`.
#[must_use]
pub fn generate_session_id(now: OffsetDateTime) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("session_{}_{millis}", &random[..RANDOM_LEN])
}

/// Returns the tab's identifier, creating and storing one when absent.
///
/// Storage failures never block a dispatch: they are logged and a fresh
/// identifier is returned.
pub fn get_or_create_session_id(storage: &dyn TabStorage, now: OffsetDateTime) -> String {
    match storage.get(SESSION_ID_KEY) {
        Ok(Some(existing)) if !existing.trim().is_empty() => return existing,
        Ok(_) => {}
        Err(error) => {
            tracing::warn!(%error, "session id storage unreadable; generating a new id");
        }
    }

    let session_id = generate_session_id(now);
    if let Err(error) = storage.set(SESSION_ID_KEY, &session_id) {
        tracing::warn!(%error, "could not persist session id; continuing with an ephemeral one");
    } else {
        tracing::info!(%session_id, "created session id for this tab");
    }
    session_id
}

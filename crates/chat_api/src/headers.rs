use std::collections::BTreeMap;

use crate::config::ChatApiConfig;
use crate::error::ChatApiError;

pub const HEADER_SESSION_ID: &str = "X-Session-ID";
pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "User-Agent";

/// Build a deterministic header map for chat requests.
///
/// The correlation header is omitted when `session_id` is blank; the dispatcher
/// never blocks on a missing identifier.
pub fn build_headers(
    config: &ChatApiConfig,
    session_id: Option<&str>,
) -> Result<BTreeMap<String, String>, ChatApiError> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = match config.user_agent.as_deref() {
        Some(explicit) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        _ => default_user_agent(),
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(ChatApiError::InvalidHeader("empty header name".to_owned()));
        }
        headers.insert(key, value.trim().to_owned());
    }

    if let Some(session_id) = session_id.map(str::trim).filter(|value| !value.is_empty()) {
        headers.insert(HEADER_SESSION_ID.to_owned(), session_id.to_owned());
    }

    Ok(headers)
}

fn default_user_agent() -> String {
    format!(
        "chat_widget/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

use crate::error::ChatApiError;

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/api/health";

/// Resolve the chat endpoint relative to `origin`.
pub fn chat_endpoint(origin: &str) -> String {
    join_origin(origin, CHAT_PATH)
}

/// Resolve the health endpoint relative to `origin`.
pub fn health_endpoint(origin: &str) -> String {
    join_origin(origin, HEALTH_PATH)
}

/// Accepts absolute `http`/`https` origins only.
pub fn validate_origin(origin: &str) -> Result<(), ChatApiError> {
    let trimmed = origin.trim();
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ChatApiError::InvalidOrigin(trimmed.to_owned()))?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(ChatApiError::InvalidOrigin(trimmed.to_owned()));
    }
    Ok(())
}

fn join_origin(origin: &str, path: &str) -> String {
    let base = if origin.trim().is_empty() {
        DEFAULT_ORIGIN
    } else {
        origin.trim()
    };
    format!("{}{path}", base.trim_end_matches('/'))
}

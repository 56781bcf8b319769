use crate::error::parse_error_detail;
use crate::transport::ChatTransport;

/// Transcript notice shown once when the startup probe fails.
pub const HEALTH_WARNING: &str =
    "Unable to reach the chat service. The backend may be unreachable; messages might fail until it is back.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy { detail: String },
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// One GET against the health endpoint, never retried.
pub async fn probe_health<T: ChatTransport>(transport: &T) -> HealthStatus {
    match transport.get_health().await {
        Ok(reply) if reply.is_success() => {
            tracing::info!(status = reply.status, "chat backend is healthy");
            HealthStatus::Healthy
        }
        Ok(reply) => {
            let detail = parse_error_detail(reply.status, &reply.body);
            tracing::warn!(status = reply.status, %detail, "chat backend health check failed");
            HealthStatus::Unhealthy { detail }
        }
        Err(error) => {
            tracing::warn!(%error, "chat backend health check could not connect");
            HealthStatus::Unhealthy {
                detail: error.to_string(),
            }
        }
    }
}

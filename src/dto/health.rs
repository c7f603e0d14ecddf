use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when the store answers, "degraded" otherwise.
    pub status: String,
    /// Whether the rest countdown is currently ticking.
    pub rest_timer_armed: bool,
}

impl HealthResponse {
    /// Store reachable.
    pub fn ok(rest_timer_armed: bool) -> Self {
        Self {
            status: "ok".to_string(),
            rest_timer_armed,
        }
    }

    /// Store failing its health check.
    pub fn degraded(rest_timer_armed: bool) -> Self {
        Self {
            status: "degraded".to_string(),
            rest_timer_armed,
        }
    }
}

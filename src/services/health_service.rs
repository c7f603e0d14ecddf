use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the store answers, logging the failure when it does not.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let rest_timer_armed = state.rotation().await.rest_timer_armed();

    match state.store().health_check() {
        Ok(()) => HealthResponse::ok(rest_timer_armed),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded(rest_timer_armed)
        }
    }
}

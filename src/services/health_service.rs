use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the store and report availability.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.game_store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "store health check failed");
            HealthResponse::unavailable()
        }
    }
}

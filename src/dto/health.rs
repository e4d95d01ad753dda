use serde::Serialize;
use utoipa::ToSchema;

/// Health status payload returned by the healthcheck endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `available` when the store answers the probe, `unavailable` otherwise.
    pub status: &'static str,
}

impl HealthResponse {
    /// The store answered the probe.
    pub fn ok() -> Self {
        Self {
            status: "available",
        }
    }

    /// The store probe failed.
    pub fn unavailable() -> Self {
        Self {
            status: "unavailable",
        }
    }
}

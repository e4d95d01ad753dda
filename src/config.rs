//! Process configuration read from the environment.

use std::env;

use tracing::warn;

/// Default TCP port when none is configured.
const DEFAULT_PORT: u16 = 8080;

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the HTTP server binds to.
    pub port: u16,
    /// Which store backend to construct at startup.
    pub backend: StoreBackend,
}

/// Persistence backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL-backed store (the default).
    #[cfg(feature = "pg-store")]
    Postgres,
    /// Volatile in-process store for ephemeral runs.
    Memory,
}

impl AppConfig {
    /// Load the configuration, falling back to defaults on unset or
    /// malformed variables.
    pub fn load() -> Self {
        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            backend: resolve_backend(),
        }
    }
}

fn resolve_backend() -> StoreBackend {
    let requested = env::var("STORE_BACKEND").unwrap_or_default();
    match requested.as_str() {
        "memory" => StoreBackend::Memory,
        #[cfg(feature = "pg-store")]
        "" | "postgres" => StoreBackend::Postgres,
        #[cfg(not(feature = "pg-store"))]
        "" => StoreBackend::Memory,
        other => {
            warn!(backend = other, "unknown store backend; using the default");
            default_backend()
        }
    }
}

#[cfg(feature = "pg-store")]
fn default_backend() -> StoreBackend {
    StoreBackend::Postgres
}

#[cfg(not(feature = "pg-store"))]
fn default_backend() -> StoreBackend {
    StoreBackend::Memory
}

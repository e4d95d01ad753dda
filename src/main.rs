//! Game catalog backend binary entrypoint wiring the HTTP and store layers.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_catalog_back::config::{AppConfig, StoreBackend};
use game_catalog_back::dao::game_store::GameStore;
use game_catalog_back::dao::game_store::memory::MemoryGameStore;
#[cfg(feature = "pg-store")]
use game_catalog_back::dao::game_store::postgres::{PgConfig, PgGameStore};
use game_catalog_back::routes;
use game_catalog_back::state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = build_store(&config).await?;
    let state = AppState::new(store);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Construct the store backend selected by the configuration.
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn GameStore>> {
    match config.backend {
        #[cfg(feature = "pg-store")]
        StoreBackend::Postgres => {
            let pg_config = PgConfig::from_env().context("reading database configuration")?;
            let store = PgGameStore::connect(pg_config)
                .await
                .context("connecting to PostgreSQL")?;
            info!("connected to PostgreSQL");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("using the in-memory store; records will not survive a restart");
            Ok(Arc::new(MemoryGameStore::new()))
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

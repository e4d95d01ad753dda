use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod games;
pub mod health;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router().merge(games::router()).merge(docs::router());

    api_router.with_state(state)
}

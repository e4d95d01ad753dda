//! Shared application state.

use std::sync::Arc;

use crate::dao::game_store::GameStore;

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state carrying the store handle.
pub struct AppState {
    game_store: Arc<dyn GameStore>,
}

impl AppState {
    /// Wrap a store into a shareable state handle.
    pub fn new(game_store: Arc<dyn GameStore>) -> SharedState {
        Arc::new(Self { game_store })
    }

    /// Obtain a handle to the game store.
    pub fn game_store(&self) -> Arc<dyn GameStore> {
        self.game_store.clone()
    }
}

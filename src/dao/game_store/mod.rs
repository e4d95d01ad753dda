//! Persistence seam for catalog games.

pub mod memory;
#[cfg(feature = "pg-store")]
pub mod postgres;

use futures::future::BoxFuture;

use crate::dao::filters::{Filters, Metadata};
use crate::dao::models::{GameDraft, GameEntity};
use crate::dao::storage::StoreResult;

/// Abstraction over the persistence layer for catalog games.
///
/// Implementations guarantee the optimistic-concurrency protocol: `update`
/// commits atomically only when both the id and the caller-observed version
/// still match, so a losing concurrent writer observes an edit conflict
/// instead of silently overwriting.
pub trait GameStore: Send + Sync {
    /// Persist a new game, assigning its id, creation timestamp and version 1.
    fn insert(&self, draft: GameDraft) -> BoxFuture<'static, StoreResult<GameEntity>>;
    /// Fetch a game by id.
    fn get(&self, id: i64) -> BoxFuture<'static, StoreResult<GameEntity>>;
    /// Commit changed fields if the stored version still matches
    /// `game.version`; the returned entity carries the refreshed version.
    fn update(&self, game: GameEntity) -> BoxFuture<'static, StoreResult<GameEntity>>;
    /// Remove a game by id.
    fn delete(&self, id: i64) -> BoxFuture<'static, StoreResult<()>>;
    /// Page through games matching a title query and a tag containment
    /// filter, returning the page plus its metadata.
    fn list(
        &self,
        title: String,
        tags: Vec<String>,
        filters: Filters,
    ) -> BoxFuture<'static, StoreResult<(Vec<GameEntity>, Metadata)>>;
    /// Cheap connectivity probe for health reporting.
    fn health_check(&self) -> BoxFuture<'static, StoreResult<()>>;
}

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::dao::filters::{Filters, Metadata, calculate_metadata};
use crate::dao::game_store::GameStore;
use crate::dao::models::{GameDraft, GameEntity};
use crate::dao::storage::{StoreError, StoreResult};

/// Volatile [`GameStore`] keeping every record in process memory.
///
/// Data does not survive a restart. The update and delete paths reproduce the
/// SQL backend's compare-and-increment and row-count semantics; the list path
/// approximates full-text search with case-insensitive keyword matching.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    inner: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    rows: BTreeMap<i64, GameEntity>,
}

impl MemoryGameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, draft: GameDraft) -> StoreResult<GameEntity> {
        let mut state = self.inner.write().await;
        state.next_id += 1;
        let entity = GameEntity {
            id: state.next_id,
            created_at: OffsetDateTime::now_utc(),
            title: draft.title,
            description: draft.description,
            tags: draft.tags.unwrap_or_default(),
            score: draft.score,
            version: 1,
        };
        state.rows.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: i64) -> StoreResult<GameEntity> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }
        let state = self.inner.read().await;
        state
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecordNotFound)
    }

    async fn update(&self, game: GameEntity) -> StoreResult<GameEntity> {
        let mut state = self.inner.write().await;
        // Compare-and-increment under a single lock, matching the SQL
        // backend's one conditional UPDATE statement.
        match state.rows.get_mut(&game.id) {
            Some(stored) if stored.version == game.version => {
                stored.title = game.title;
                stored.description = game.description;
                stored.tags = game.tags;
                stored.score = game.score;
                stored.version += 1;
                Ok(stored.clone())
            }
            _ => Err(StoreError::EditConflict),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }
        let mut state = self.inner.write().await;
        match state.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::RecordNotFound),
        }
    }

    async fn list(
        &self,
        title: String,
        tags: Vec<String>,
        filters: Filters,
    ) -> StoreResult<(Vec<GameEntity>, Metadata)> {
        let state = self.inner.read().await;
        let mut matches: Vec<GameEntity> = state
            .rows
            .values()
            .filter(|game| title_matches(&title, &game.title) && contains_all(&game.tags, &tags))
            .cloned()
            .collect();

        sort_games(&mut matches, &filters);

        let total_records = matches.len() as i64;
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);
        let page = matches
            .into_iter()
            .skip(filters.offset() as usize)
            .take(filters.limit() as usize)
            .collect();
        Ok((page, metadata))
    }
}

/// Case-insensitive keyword match: every word of `query` must appear as a
/// word of `title`. Empty queries match everything.
fn title_matches(query: &str, title: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let title = title.to_lowercase();
    let words: Vec<&str> = title.split_whitespace().collect();
    query
        .to_lowercase()
        .split_whitespace()
        .all(|needle| words.contains(&needle))
}

/// Whether `stored` is a superset of `filter`. An empty filter matches
/// everything.
fn contains_all(stored: &[String], filter: &[String]) -> bool {
    filter.iter().all(|tag| stored.contains(tag))
}

fn sort_games(games: &mut [GameEntity], filters: &Filters) {
    let descending = filters.sort_direction() == "DESC";
    let column = filters.sort_column().to_owned();
    games.sort_by(|a, b| {
        let ordering = match column.as_str() {
            "title" => a.title.cmp(&b.title),
            "score" => a.score.cmp(&b.score),
            _ => a.id.cmp(&b.id),
        };
        let ordering = if descending {
            ordering.reverse()
        } else {
            ordering
        };
        // Deterministic tie-break mirroring the SQL `id ASC`.
        ordering.then_with(|| a.id.cmp(&b.id))
    });
}

impl GameStore for MemoryGameStore {
    fn insert(&self, draft: GameDraft) -> BoxFuture<'static, StoreResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert(draft).await })
    }

    fn get(&self, id: i64) -> BoxFuture<'static, StoreResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move { store.get(id).await })
    }

    fn update(&self, game: GameEntity) -> BoxFuture<'static, StoreResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move { store.update(game).await })
    }

    fn delete(&self, id: i64) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.delete(id).await })
    }

    fn list(
        &self,
        title: String,
        tags: Vec<String>,
        filters: Filters,
    ) -> BoxFuture<'static, StoreResult<(Vec<GameEntity>, Metadata)>> {
        let store = self.clone();
        Box::pin(async move { store.list(title, tags, filters).await })
    }

    fn health_check(&self) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let _ = store.inner.read().await;
            Ok(())
        })
    }
}

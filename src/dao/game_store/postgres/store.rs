use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::postgres::PgPool;
use sqlx::{FromRow, Row};
use time::OffsetDateTime;
use tokio::time::timeout;

use super::config::PgConfig;
use super::connection::{ensure_schema, establish_pool};
use super::error::{PgDaoError, PgResult};
use crate::dao::filters::{Filters, Metadata, calculate_metadata};
use crate::dao::game_store::GameStore;
use crate::dao::models::{GameDraft, GameEntity};
use crate::dao::storage::{StoreError, StoreResult};

/// Budget for a single database operation; exceeding it surfaces as a store
/// failure, never a hang.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(3);

/// [`GameStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    /// Connect to the database and bring the schema up.
    pub async fn connect(config: PgConfig) -> PgResult<Self> {
        let pool = establish_pool(&config).await?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap a store around an existing pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, draft: GameDraft) -> PgResult<GameEntity> {
        let query = "
            INSERT INTO games (title, description, score, tags)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, version";

        let tags = draft.tags.unwrap_or_default();
        let (id, created_at, version): (i64, OffsetDateTime, i32) = bounded(
            "insert",
            sqlx::query_as(query)
                .bind(&draft.title)
                .bind(&draft.description)
                .bind(draft.score)
                .bind(&tags)
                .fetch_one(&self.pool),
            |source| PgDaoError::Insert { source },
        )
        .await?;

        Ok(GameEntity {
            id,
            created_at,
            title: draft.title,
            description: draft.description,
            tags,
            score: draft.score,
            version,
        })
    }

    async fn get(&self, id: i64) -> PgResult<Option<GameEntity>> {
        let query = "
            SELECT id, created_at, title, description, score, tags, version
            FROM games
            WHERE id = $1";

        bounded(
            "get",
            sqlx::query_as::<_, GameEntity>(query)
                .bind(id)
                .fetch_optional(&self.pool),
            |source| PgDaoError::Fetch { id, source },
        )
        .await
    }

    /// Conditional update: commits and bumps the version only when the stored
    /// version still matches. `None` means zero rows matched.
    async fn update(&self, game: &GameEntity) -> PgResult<Option<i32>> {
        let query = "
            UPDATE games
            SET title = $1, score = $2, tags = $3, version = version + 1
            WHERE id = $4 AND version = $5
            RETURNING version";

        bounded(
            "update",
            sqlx::query_scalar::<_, i32>(query)
                .bind(&game.title)
                .bind(game.score)
                .bind(&game.tags)
                .bind(game.id)
                .bind(game.version)
                .fetch_optional(&self.pool),
            |source| PgDaoError::Update { id: game.id, source },
        )
        .await
    }

    async fn delete(&self, id: i64) -> PgResult<u64> {
        let query = "DELETE FROM games WHERE id = $1";

        let result = bounded(
            "delete",
            sqlx::query(query).bind(id).execute(&self.pool),
            |source| PgDaoError::Delete { id, source },
        )
        .await?;
        Ok(result.rows_affected())
    }

    async fn list(
        &self,
        title: &str,
        tags: &[String],
        filters: &Filters,
    ) -> PgResult<(Vec<GameEntity>, Metadata)> {
        // The interpolated sort expression is never raw client input: both
        // column and direction come out of the safelist-checked filters.
        let query = format!(
            "SELECT count(*) OVER() AS total_records,
                    id, created_at, title, description, score, tags, version
             FROM games
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
             AND (tags @> $2 OR $2 = '{{}}')
             ORDER BY {} {}, id ASC
             LIMIT $3 OFFSET $4",
            filters.sort_column(),
            filters.sort_direction(),
        );

        let rows = bounded(
            "list",
            sqlx::query(&query)
                .bind(title)
                .bind(tags)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool),
            |source| PgDaoError::List { source },
        )
        .await?;

        let mut total_records = 0_i64;
        let mut games = Vec::with_capacity(rows.len());
        for row in &rows {
            total_records = row
                .try_get("total_records")
                .map_err(|source| PgDaoError::List { source })?;
            games.push(GameEntity::from_row(row).map_err(|source| PgDaoError::List { source })?);
        }

        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);
        Ok((games, metadata))
    }

    async fn ping(&self) -> PgResult<()> {
        bounded(
            "ping",
            sqlx::query("SELECT 1").execute(&self.pool),
            |source| PgDaoError::Ping { source },
        )
        .await?;
        Ok(())
    }
}

/// Run a database future under the per-operation time budget, mapping its
/// error through `wrap`.
async fn bounded<T, F>(
    operation: &'static str,
    fut: F,
    wrap: impl FnOnce(sqlx::Error) -> PgDaoError,
) -> PgResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(OPERATION_TIMEOUT, fut).await {
        Ok(result) => result.map_err(wrap),
        Err(_) => Err(PgDaoError::Timeout { operation }),
    }
}

impl GameStore for PgGameStore {
    fn insert(&self, draft: GameDraft) -> BoxFuture<'static, StoreResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move { store.insert(draft).await.map_err(Into::into) })
    }

    fn get(&self, id: i64) -> BoxFuture<'static, StoreResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move {
            if id < 1 {
                return Err(StoreError::RecordNotFound);
            }
            match store.get(id).await? {
                Some(game) => Ok(game),
                None => Err(StoreError::RecordNotFound),
            }
        })
    }

    fn update(&self, mut game: GameEntity) -> BoxFuture<'static, StoreResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move {
            match store.update(&game).await? {
                Some(version) => {
                    game.version = version;
                    Ok(game)
                }
                // Zero rows matched: the record is gone or the version is
                // stale. Callers cannot tell which; they re-read and retry.
                None => Err(StoreError::EditConflict),
            }
        })
    }

    fn delete(&self, id: i64) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if id < 1 {
                return Err(StoreError::RecordNotFound);
            }
            if store.delete(id).await? == 0 {
                return Err(StoreError::RecordNotFound);
            }
            Ok(())
        })
    }

    fn list(
        &self,
        title: String,
        tags: Vec<String>,
        filters: Filters,
    ) -> BoxFuture<'static, StoreResult<(Vec<GameEntity>, Metadata)>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list(&title, &tags, &filters)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}

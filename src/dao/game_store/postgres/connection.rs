//! Pool construction and idempotent schema bootstrap.

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::config::PgConfig;
use super::error::{PgDaoError, PgResult};

/// Statements bringing the catalog schema up; all idempotent so they can run
/// on every startup.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS games (
        id bigserial PRIMARY KEY,
        created_at timestamptz NOT NULL DEFAULT now(),
        title text NOT NULL,
        description text,
        score integer NOT NULL,
        tags text[] NOT NULL,
        version integer NOT NULL DEFAULT 1
    )",
    "CREATE INDEX IF NOT EXISTS games_title_idx ON games \
     USING GIN (to_tsvector('simple', title))",
    "CREATE INDEX IF NOT EXISTS games_tags_idx ON games USING GIN (tags)",
];

/// Open a connection pool against the configured database.
pub async fn establish_pool(config: &PgConfig) -> PgResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|source| PgDaoError::Connect { source })
}

/// Create the games table and its search indexes when absent.
pub async fn ensure_schema(pool: &PgPool) -> PgResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|source| PgDaoError::EnsureSchema { source })?;
    }
    Ok(())
}

//! Error types specific to the PostgreSQL backend.

use thiserror::Error;

use crate::dao::storage::StoreError;

/// Convenient result alias returning [`PgDaoError`] failures.
pub type PgResult<T> = Result<T, PgDaoError>;

/// Failures that can occur while talking to PostgreSQL.
#[derive(Debug, Error)]
pub enum PgDaoError {
    /// Required environment variable is missing.
    #[error("missing database environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// Opening the connection pool failed.
    #[error("failed to connect to PostgreSQL")]
    Connect {
        #[source]
        source: sqlx::Error,
    },
    /// Creating the games table or its indexes failed.
    #[error("failed to ensure catalog schema")]
    EnsureSchema {
        #[source]
        source: sqlx::Error,
    },
    /// An insert could not be executed or its returned row decoded.
    #[error("failed to insert game")]
    Insert {
        #[source]
        source: sqlx::Error,
    },
    /// A point lookup could not be executed or decoded.
    #[error("failed to fetch game `{id}`")]
    Fetch {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// A conditional update could not be executed or decoded.
    #[error("failed to update game `{id}`")]
    Update {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// A delete could not be executed.
    #[error("failed to delete game `{id}`")]
    Delete {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// The list query could not be executed or decoded.
    #[error("failed to list games")]
    List {
        #[source]
        source: sqlx::Error,
    },
    /// The health probe failed.
    #[error("database ping failed")]
    Ping {
        #[source]
        source: sqlx::Error,
    },
    /// An operation exceeded the per-call time budget.
    #[error("database operation `{operation}` timed out")]
    Timeout {
        /// Name of the operation that ran out of time.
        operation: &'static str,
    },
}

impl From<PgDaoError> for StoreError {
    fn from(err: PgDaoError) -> Self {
        match err {
            PgDaoError::Timeout { operation } => StoreError::timeout(operation),
            other => {
                let message = other.to_string();
                StoreError::failure(message, other)
            }
        }
    }
}

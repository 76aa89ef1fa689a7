//! Database-specific error types and conversions.

use cohort_core::error::CohortError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query rejected: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for CohortError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CohortError::NotFound { entity, id },
            other => CohortError::Database(other.to_string()),
        }
    }
}

//! Error types for the Cohort system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CohortError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl CohortError {
    /// Shorthand for a [`CohortError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status code an API layer should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Database(_) => 500,
        }
    }
}

pub type CohortResult<T> = Result<T, CohortError>;

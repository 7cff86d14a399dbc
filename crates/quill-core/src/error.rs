//! Domain-level error types.

use thiserror::Error;

use crate::domain::ValidationErrors;

/// Domain errors - the negative outcomes of a post operation.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl DomainError {
    pub fn post_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id: id.to_string(),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Configuration(msg) => DomainError::Configuration(msg),
            other => DomainError::Backend(other.to_string()),
        }
    }
}

/// Repository-level errors.
///
/// `Clone` so a single failed connection attempt can be handed to every
/// caller that was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum RepoError {
    #[error("Database is not configured: {0}")]
    Configuration(String),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}

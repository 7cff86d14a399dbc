//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::RepoError;
use quill_core::ports::PostRepository;
use quill_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::{PostgresConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<PostgresConnections>>,
}

impl AppState {
    /// Build the application state for the configured store.
    ///
    /// The database connection itself is opened lazily by the first request.
    #[cfg(feature = "postgres")]
    pub fn new(db_config: &DatabaseConfig) -> Result<Self, RepoError> {
        if db_config.url.is_none() {
            return Err(RepoError::Configuration(
                "DATABASE_URL is not set".to_string(),
            ));
        }

        let connections = Arc::new(PostgresConnections::from_config(db_config));
        let repo = Arc::new(PostgresPostRepository::new(connections.clone()));

        tracing::info!("Application state initialized");

        Ok(Self {
            posts: PostService::new(repo),
            db: Some(connections),
        })
    }

    #[cfg(not(feature = "postgres"))]
    pub fn new(_db_config: &DatabaseConfig) -> Result<Self, RepoError> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Self::in_memory())
    }

    /// State backed by a process-local store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Short description of the store for the health endpoint.
    pub async fn database_status(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        {
            if let Some(db) = &self.db {
                return if db.is_connected().await {
                    "connected"
                } else {
                    "not connected"
                };
            }
        }

        "in-memory"
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostDraft};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Each method is a single store operation; nothing spans calls.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Fetch every entity in the store's natural order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns `false` if nothing matched.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Overwrite title and content and refresh `updated_at` in one write.
    ///
    /// Returns the post-update state, or `None` if the post does not exist.
    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Option<Post>, RepoError>;
}

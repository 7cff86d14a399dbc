//! Post operations - validation plus exactly one repository call each.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostInput};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// List, create, read, update and delete over the post collection.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts, in the store's natural order.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.repo.find_all().await?;
        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// Validate and persist a new post.
    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        let draft = PostDraft::parse(input)?;
        let post = self.repo.insert(Post::new(draft)).await?;
        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Validate, then overwrite title and content.
    ///
    /// Input is checked before the store is touched, so invalid input on an
    /// unknown id reports the validation failure.
    pub async fn update(&self, id: Uuid, input: PostInput) -> Result<Post, DomainError> {
        let draft = PostDraft::parse(input)?;
        let post = self
            .repo
            .update(id, draft)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::post_not_found(id));
        }
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

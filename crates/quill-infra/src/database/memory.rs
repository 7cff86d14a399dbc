//! In-memory post repository - used when the server is built without a
//! database and by the HTTP tests.
//!
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// In-memory post store kept in insertion order.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        posts.push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.apply(draft);
            post.clone()
        }))
    }
}

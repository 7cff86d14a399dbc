//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, DbErr};
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, "Updating post");

        let db = self.db().await?;
        let (title, content) = draft.into_parts();

        // Single UPDATE ... RETURNING; concurrent writers resolve last-write-wins.
        let changes = post::ActiveModel {
            id: Set(id),
            title: Set(title),
            content: Set(content),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        match changes.update(db.as_ref()).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(RepoError::Query(e.to_string())),
        }
    }
}

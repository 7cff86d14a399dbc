use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};

use quill_core::error::RepoError;
use quill_core::ports::BaseRepository;

use super::connections::PostgresConnections;

/// Generic PostgreSQL repository implementation.
///
/// Every operation first obtains the shared handle from the connection
/// manager, so the first request to arrive triggers the connection.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    connections: Arc<PostgresConnections>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(connections: Arc<PostgresConnections>) -> Self {
        Self {
            connections,
            _entity: PhantomData,
        }
    }

    pub(crate) async fn db(&self) -> Result<Arc<DbConn>, RepoError> {
        self.connections.get_connection().await
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let db = self.db().await?;
        let models = E::find()
            .all(db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let db = self.db().await?;
        let result = E::find_by_id(id)
            .one(db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let db = self.db().await?;
        let active_model: E::ActiveModel = entity.into();
        let model = active_model
            .insert(db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<bool, RepoError> {
        let db = self.db().await?;
        let result = E::delete_by_id(id)
            .exec(db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

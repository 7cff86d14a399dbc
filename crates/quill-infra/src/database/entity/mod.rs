//! SeaORM entities.

pub mod post;

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

/// Create the posts table if it is not there yet.
///
/// Stands in for a document store creating its collection on first write;
/// there are no versioned migrations.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(post::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt)).await?;
    tracing::debug!("Posts table ready");
    Ok(())
}

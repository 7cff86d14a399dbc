//! Database connection management and post repositories.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{ConnectionManager, DatabaseConfig};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::{PostgresConnections, PostgresConnector};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;

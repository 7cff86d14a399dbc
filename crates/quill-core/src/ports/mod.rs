//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod connector;
mod repository;

pub use connector::Connector;
pub use repository::{BaseRepository, PostRepository};

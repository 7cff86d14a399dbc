use async_trait::async_trait;

use crate::error::RepoError;

/// Connector trait - opens a handle to the backing store.
///
/// Implementations perform one connection attempt per call; memoizing the
/// handle is the caller's job.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Shareable handle, cheap to clone.
    type Handle: Clone + Send + Sync + 'static;

    /// Connect using the given connection string.
    async fn connect(&self, url: &str) -> Result<Self::Handle, RepoError>;
}

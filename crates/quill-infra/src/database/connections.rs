use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use quill_core::RepoError;
use quill_core::ports::Connector;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn};

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string. `None` means the database is not configured.
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

type Attempt<H> = Shared<BoxFuture<'static, Result<H, RepoError>>>;

enum Slot<H: Clone> {
    Idle,
    Connecting(Attempt<H>),
    Ready(H),
}

/// Lazily connects once and hands the same handle to every caller.
///
/// The first caller starts the connection attempt; callers arriving while it
/// is in flight await that same attempt and get its outcome, success or
/// failure. A successful handle is kept for the life of the manager. A failed
/// attempt is forgotten, so the next call starts over.
///
/// # Example
/// ```ignore
/// let manager = ConnectionManager::new(connector, config.url.clone());
/// let db = manager.get_connection().await?;
/// ```
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    url: Option<String>,
    slot: Arc<Mutex<Slot<C::Handle>>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, url: Option<String>) -> Self {
        Self {
            connector: Arc::new(connector),
            url,
            slot: Arc::new(Mutex::new(Slot::Idle)),
        }
    }

    /// Wrap a handle that is already connected.
    pub fn established(connector: C, handle: C::Handle) -> Self {
        Self {
            connector: Arc::new(connector),
            url: None,
            slot: Arc::new(Mutex::new(Slot::Ready(handle))),
        }
    }

    /// Return the shared handle, connecting first if nobody has yet.
    pub async fn get_connection(&self) -> Result<C::Handle, RepoError> {
        let attempt = {
            let mut slot = self.slot.lock().await;
            match &*slot {
                Slot::Ready(handle) => {
                    tracing::debug!("Using existing database connection");
                    return Ok(handle.clone());
                }
                Slot::Connecting(attempt) => {
                    tracing::debug!("Joining in-flight connection attempt");
                    attempt.clone()
                }
                Slot::Idle => {
                    let Some(url) = self.url.clone() else {
                        return Err(RepoError::Configuration(
                            "DATABASE_URL is not set".to_string(),
                        ));
                    };
                    let attempt = self.start_attempt(url);
                    *slot = Slot::Connecting(attempt.clone());
                    attempt
                }
            }
        };

        attempt.await
    }

    /// The attempt settles the slot itself, before any waiter sees its outcome.
    fn start_attempt(&self, url: String) -> Attempt<C::Handle> {
        let connector = Arc::clone(&self.connector);
        let slot = Arc::downgrade(&self.slot);

        async move {
            let result = connector.connect(&url).await;

            if let Some(slot) = slot.upgrade() {
                let mut slot = slot.lock().await;
                *slot = match &result {
                    Ok(handle) => {
                        tracing::info!("Database connection established");
                        Slot::Ready(handle.clone())
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Database connection failed");
                        Slot::Idle
                    }
                };
            }

            result
        }
        .boxed()
        .shared()
    }

    /// Whether a handle has been established.
    pub async fn is_connected(&self) -> bool {
        matches!(*self.slot.lock().await, Slot::Ready(_))
    }
}

/// Opens pooled PostgreSQL connections and makes sure the posts table exists.
#[cfg(feature = "postgres")]
#[derive(Debug, Clone)]
pub struct PostgresConnector {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

#[cfg(feature = "postgres")]
impl PostgresConnector {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout: config.connect_timeout,
        }
    }
}

#[cfg(feature = "postgres")]
impl Default for PostgresConnector {
    fn default() -> Self {
        Self::from_config(&DatabaseConfig::default())
    }
}

#[cfg(feature = "postgres")]
#[async_trait::async_trait]
impl Connector for PostgresConnector {
    type Handle = Arc<DbConn>;

    async fn connect(&self, url: &str) -> Result<Arc<DbConn>, RepoError> {
        tracing::info!("Connecting to database...");

        let opts = ConnectOptions::new(url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let db = Database::connect(opts)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        super::entity::ensure_schema(&db)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(pool = self.max_connections, "Database connected");
        Ok(Arc::new(db))
    }
}

/// Connection manager for the PostgreSQL store.
#[cfg(feature = "postgres")]
pub type PostgresConnections = ConnectionManager<PostgresConnector>;

#[cfg(feature = "postgres")]
impl PostgresConnections {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(PostgresConnector::from_config(config), config.url.clone())
    }
}

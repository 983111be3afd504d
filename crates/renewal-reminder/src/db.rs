use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{debug, info};

use crate::error::Result;

/// Pool settings for [`connect`].
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl DatabaseSettings {
    /// Single pinned connection. An in-memory SQLite database lives only as
    /// long as its connection, so it must never be recycled.
    pub fn in_memory_sqlite() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
        }
    }
}

pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(settings.url.clone());

    // Batch tool: keep the pool small and timeouts short.
    options.max_connections(settings.max_connections);
    options.min_connections(settings.min_connections);
    options.connect_timeout(settings.connect_timeout);
    options.acquire_timeout(settings.connect_timeout);
    if let Some(idle) = settings.idle_timeout {
        options.idle_timeout(idle);
    }
    options.sqlx_logging(false);

    debug!(max_connections = settings.max_connections, "opening database pool");
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "database connected");

    Ok(db)
}

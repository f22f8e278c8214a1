//! Database connection pool management
//!
//! Provides unified SQLite pool creation and configuration for the blog
//! services. The database lives in a single file (or in memory for ad-hoc
//! tooling); WAL journaling keeps concurrent readers cheap.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for log labeling
    pub service_name: String,
    /// SQLite connection URL, e.g. `sqlite:///var/lib/yarrow/blog.sqlite`
    pub database_url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// How long a connection waits on a locked database before failing
    pub busy_timeout_ms: u64,
    /// Create the database file when it does not exist yet
    pub create_if_missing: bool,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .field("create_if_missing", &self.create_if_missing)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 8,
            acquire_timeout_secs: 10,
            busy_timeout_ms: 5_000,
            create_if_missing: true,
        }
    }
}

impl DbConfig {
    /// Create a new DbConfig from environment variables
    pub fn from_env(service_name: &str) -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set".to_string())?;

        Ok(Self {
            service_name: service_name.to_string(),
            database_url,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            busy_timeout_ms: std::env::var("DB_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            create_if_missing: std::env::var("DB_CREATE_IF_MISSING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        })
    }

    /// Log the effective pool configuration without leaking the URL
    pub fn log_config(&self) {
        info!(
            service = %self.service_name,
            max_connections = self.max_connections,
            acquire_timeout_secs = self.acquire_timeout_secs,
            busy_timeout_ms = self.busy_timeout_ms,
            "database pool configuration"
        );
    }
}

/// Create a SQLite connection pool from the given configuration.
///
/// Foreign key enforcement is always on; writers go through WAL so that
/// readers never block behind them.
pub async fn create_pool(config: DbConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(config.create_if_missing)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    debug!(service = %config.service_name, "connecting to database");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    info!(
        service = %config.service_name,
        "database pool ready ({} max connections)",
        config.max_connections
    );

    Ok(pool)
}

//! Database connection helpers.
//!
//! Every `{domain}/{environment}` pair owns a separate SQLite database. The
//! [`EnvironmentDatabases`] registry creates those databases on first use,
//! applies the embedded migrations and caches one connection pool per
//! environment.

use std::path::PathBuf;
use std::time::Duration;

use dashmap::DashMap;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{error, info};

use crate::domain::types::EnvironmentKey;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug)]
/// Options that are applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    /// Enable Write Ahead Logging mode for SQLite.
    pub enable_wal: bool,
    /// Enforce foreign key checks for SQLite.
    pub enable_foreign_keys: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        (|| {
            if self.enable_wal {
                conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            if self.enable_foreign_keys {
                conn.batch_execute("PRAGMA foreign_keys = ON;")?;
            }
            if let Some(d) = self.busy_timeout {
                conn.batch_execute(&format!("PRAGMA busy_timeout = {};", d.as_millis()))?;
            }
            Ok(())
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }))
        .build(manager)
}

/// Retrieve a connection from the pool
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    match pool.get() {
        Ok(conn) => Ok(conn),
        Err(e) => {
            error!("Failed to get connection from pool: {e}");
            Err(e)
        }
    }
}

/// Applies any migrations that have not yet run against the pool's database.
pub fn run_migrations(pool: &DbPool) -> RepositoryResult<()> {
    let mut conn = get_connection(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::MigrationError(e.to_string()))?;
    if !applied.is_empty() {
        info!("Applied {} migration(s)", applied.len());
    }
    Ok(())
}

/// Lazily provisioned connection pools, one per environment database.
pub struct EnvironmentDatabases {
    database_dir: PathBuf,
    pools: DashMap<EnvironmentKey, DbPool>,
}

impl EnvironmentDatabases {
    pub fn new(database_dir: impl Into<PathBuf>) -> Self {
        Self {
            database_dir: database_dir.into(),
            pools: DashMap::new(),
        }
    }

    /// Returns the pool for `key`, creating and migrating the database first
    /// if this is the first request for that environment.
    pub fn get_or_create(&self, key: &EnvironmentKey) -> RepositoryResult<DbPool> {
        if let Some(pool) = self.pools.get(key) {
            return Ok(pool.clone());
        }

        let pool = self
            .pools
            .entry(key.clone())
            .or_try_insert_with(|| self.provision(key))?;

        Ok(pool.clone())
    }

    fn provision(&self, key: &EnvironmentKey) -> RepositoryResult<DbPool> {
        let path = key.database_path(&self.database_dir);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RepositoryError::ConnectionError(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let database_url = path.to_string_lossy().into_owned();

        info!("Provisioning database for environment {key} at {database_url}");

        let pool = establish_connection_pool(&database_url)?;
        run_migrations(&pool)?;
        Ok(pool)
    }
}

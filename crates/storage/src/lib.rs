//! Storage layer: key-value persistence for preferences and the history blob.
//!
//! Holds DB pool setup, the migration runner and the `KvStore` seam the
//! valuation core writes through.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Computes the new value of a key from its current value (`None` when absent).
pub type UpdateFn = Box<dyn FnOnce(Option<&str>) -> String + Send>;

#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read-modify-write of a single key. Concurrent updates are serialized,
    /// so none of them is lost. Returns the value that was written.
    async fn update(&self, key: &str, f: UpdateFn) -> Result<String, StorageError>;
}

/// In-memory databases live on a single connection.
fn is_memory_url(url: &str) -> bool {
    if url.starts_with("sqlite::memory:") {
        return true;
    }
    url.split_once('?')
        .map(|(_, query)| query.split('&').any(|kv| kv == "mode=memory"))
        .unwrap_or(false)
}

pub async fn connect(database_url: &str) -> Result<SqlitePool, StorageError> {
    let mut url = database_url.to_string();
    if !database_url.starts_with("sqlite:") {
        let path = std::path::PathBuf::from(database_url);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let norm = path.to_string_lossy().replace('\\', "/");
        if path.is_absolute() {
            url = format!("sqlite:///{}", norm.trim_start_matches('/'));
        } else {
            url = format!("sqlite://{}", norm);
        }
    }
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let mut opts = SqlitePoolOptions::new();
    if is_memory_url(&url) {
        opts = opts.max_connections(1);
    } else {
        opts = opts.max_connections(5);
    }
    let pool = opts.connect_with(options).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), StorageError> {
    // Applies SQLx migrations located in crates/storage/migrations.
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

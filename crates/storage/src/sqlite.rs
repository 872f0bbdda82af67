use crate::{KvStore, StorageError, UpdateFn};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// `KvStore` over the `prefs` table.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Connects, runs migrations and wraps the pool.
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connect(database_url).await?;
        crate::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

const UPSERT: &str = "INSERT INTO prefs (key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

#[async_trait::async_trait]
impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM prefs WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        sqlx::query(UPSERT)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        debug!(key, "pref written");
        Ok(())
    }

    async fn update(&self, key: &str, f: UpdateFn) -> Result<String, StorageError> {
        // In-process writers queue on the lock; the transaction covers the
        // read and the write against other connections.
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        let current =
            sqlx::query_scalar::<_, String>("SELECT value FROM prefs WHERE key = ?1")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;
        let next = f(current.as_deref());
        sqlx::query(UPSERT)
            .bind(key)
            .bind(&next)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!(key, len = next.len(), "pref updated");
        Ok(next)
    }
}

use crate::{KvStore, StorageError, UpdateFn};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory `KvStore`; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn update(&self, key: &str, f: UpdateFn) -> Result<String, StorageError> {
        let mut entries = self.entries.lock().await;
        let next = f(entries.get(key).map(String::as_str));
        entries.insert(key.to_string(), next.clone());
        Ok(next)
    }
}

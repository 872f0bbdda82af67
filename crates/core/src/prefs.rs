//! Preferences repository: currency settings and the history blob, read and
//! written through an injected `KvStore`.

use crate::error::ValuationError;
use crate::history;
use crate::models::HistoryEntry;
use crate::validate;
use std::sync::Arc;
use storage::{KvStore, StorageError};
use tokio::sync::watch;
use tracing::{info, warn};

pub const KEY_CURRENCY: &str = "currency";
pub const KEY_RATE_TO_USD: &str = "rate_to_usd";
pub const KEY_HISTORY: &str = "history_csv";

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_RATE_TO_USD: f64 = 1.0;

#[derive(Clone)]
pub struct PrefsRepository {
    store: Arc<dyn KvStore>,
    revision: Arc<watch::Sender<u64>>,
}

impl PrefsRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            store,
            revision: Arc::new(revision),
        }
    }

    /// Receives a new revision number after every successful write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    pub async fn currency(&self) -> Result<String, StorageError> {
        Ok(self
            .store
            .get(KEY_CURRENCY)
            .await?
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
    }

    pub async fn rate_to_usd(&self) -> Result<f64, StorageError> {
        let Some(raw) = self.store.get(KEY_RATE_TO_USD).await? else {
            return Ok(DEFAULT_RATE_TO_USD);
        };
        match raw.parse::<f64>() {
            Ok(rate) => Ok(rate),
            Err(_) => {
                warn!(raw = %raw, "stored rate is not a number, using default");
                Ok(DEFAULT_RATE_TO_USD)
            }
        }
    }

    /// History entries, newest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let blob = self.store.get(KEY_HISTORY).await?.unwrap_or_default();
        Ok(history::load(&blob))
    }

    async fn write_currency(&self, code: &str) -> Result<(), StorageError> {
        self.store.set(KEY_CURRENCY, code).await?;
        info!(currency = %code, "currency saved");
        Ok(())
    }

    async fn write_rate(&self, rate: f64) -> Result<(), StorageError> {
        self.store.set(KEY_RATE_TO_USD, &rate.to_string()).await?;
        info!(rate, "rate to USD saved");
        Ok(())
    }

    pub async fn save_currency(&self, code: &str) -> Result<(), ValuationError> {
        let code = validate::parse_currency(code)?;
        self.write_currency(&code).await?;
        self.bump();
        Ok(())
    }

    pub async fn save_rate_to_usd(&self, rate: f64) -> Result<(), ValuationError> {
        let rate = validate::check_rate(rate)?;
        self.write_rate(rate).await?;
        self.bump();
        Ok(())
    }

    /// Validates both values before writing either. Subscribers see a single
    /// revision once both are stored.
    pub async fn save_settings(&self, currency: &str, rate_text: &str) -> Result<(), ValuationError> {
        let code = validate::parse_currency(currency)?;
        let rate = validate::parse_rate(rate_text)?;
        self.write_currency(&code).await?;
        self.write_rate(rate).await?;
        self.bump();
        Ok(())
    }

    pub async fn add_history(&self, entry: &HistoryEntry) -> Result<(), StorageError> {
        let timestamp = entry.timestamp_millis;
        let entry = entry.clone();
        self.store
            .update(
                KEY_HISTORY,
                Box::new(move |current: Option<&str>| {
                    history::append(&entry, current.unwrap_or_default())
                }),
            )
            .await?;
        self.bump();
        info!(timestamp, "history entry appended");
        Ok(())
    }

    pub async fn clear_history(&self) -> Result<(), StorageError> {
        self.store.set(KEY_HISTORY, &history::clear()).await?;
        self.bump();
        info!("history cleared");
        Ok(())
    }
}

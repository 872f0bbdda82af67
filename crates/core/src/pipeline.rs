use crate::config::AppConfig;
use crate::prefs::PrefsRepository;
use crate::session::ValuationSession;
use anyhow::Context;
use providers::fixed::FixedLabelProvider;
use providers::http::{HttpLabelConfig, HttpLabelProvider};
use providers::noop::NoopProvider;
use providers::ProviderRegistry;
use std::sync::Arc;
use storage::SqliteKvStore;
use tracing::{info, warn};

pub fn build_registry(config: &AppConfig) -> ProviderRegistry {
    let mut reg = ProviderRegistry::new()
        .with_labeler("noop", Arc::new(NoopProvider))
        .with_labeler(
            "fixed",
            Arc::new(FixedLabelProvider::new(config.classifier.fixed_labels.clone())),
        );

    let url = config
        .classifier
        .url
        .clone()
        .or_else(|| std::env::var("LABEL_SERVICE_URL").ok());
    if let Some(base_url) = url {
        let api_key = config
            .classifier
            .api_key
            .clone()
            .or_else(|| std::env::var("LABEL_SERVICE_API_KEY").ok());
        reg = reg.with_labeler(
            "http",
            Arc::new(HttpLabelProvider::new(HttpLabelConfig { base_url, api_key })),
        );
    } else if config.classifier.provider == "http" {
        warn!("http label provider selected but no url configured");
    }

    reg.set_preferred_labeler(&config.classifier.provider)
}

pub async fn open_prefs(config: &AppConfig) -> anyhow::Result<PrefsRepository> {
    let store = SqliteKvStore::open(&config.database.path)
        .await
        .with_context(|| format!("open preferences db at {}", config.database.path))?;
    info!(path = %config.database.path, "preferences store ready");
    Ok(PrefsRepository::new(Arc::new(store)))
}

pub async fn build_session(config: &AppConfig) -> anyhow::Result<ValuationSession> {
    let prefs = open_prefs(config).await?;
    Ok(ValuationSession::new(build_registry(config), prefs))
}

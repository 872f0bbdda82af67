//! Provider abstractions for visual label services.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod fixed;
pub mod http;
pub mod noop;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not implemented")]
    NotImplemented,
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

/// A single label as reported by a label service, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub text: String,
    pub confidence: f32,
}

impl RawLabel {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

#[async_trait::async_trait]
pub trait LabelProvider: Send + Sync {
    /// Labels an encoded image. Order of the returned labels carries no meaning.
    async fn label(&self, image: &[u8]) -> Result<Vec<RawLabel>, ProviderError>;
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    labelers: HashMap<String, Arc<dyn LabelProvider>>,
    pub preferred_labeler: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labeler(mut self, name: &str, provider: Arc<dyn LabelProvider>) -> Self {
        self.labelers.insert(name.to_string(), provider);
        self
    }

    pub fn set_preferred_labeler(mut self, name: &str) -> Self {
        self.preferred_labeler = Some(name.to_string());
        self
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.labelers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn labeler(&self, name: Option<&str>) -> Result<Arc<dyn LabelProvider>, ProviderError> {
        let key = name
            .map(str::to_string)
            .or_else(|| self.preferred_labeler.clone())
            .ok_or_else(|| ProviderError::UnknownProvider("no label provider configured".into()))?;
        self.labelers
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(key))
    }
}

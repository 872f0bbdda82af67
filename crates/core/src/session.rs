//! One user's valuation flow: classify an image, adjust the category, then
//! price and record an estimate.

use crate::error::ValuationError;
use crate::grades::{GemCategory, PurityGrade, QualityGrade};
use crate::models::{HistoryEntry, PriceEstimate, RankedPredictions};
use crate::prefs::PrefsRepository;
use crate::{classifier, inference, pricing, validate};
use providers::ProviderRegistry;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub predictions: RankedPredictions,
    pub category: GemCategory,
}

#[derive(Debug, Default)]
struct SessionState {
    analysis: Option<Analysis>,
    selected: GemCategory,
}

pub struct ValuationSession {
    registry: ProviderRegistry,
    provider: Option<String>,
    prefs: PrefsRepository,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl ValuationSession {
    pub fn new(registry: ProviderRegistry, prefs: PrefsRepository) -> Self {
        Self {
            registry,
            provider: None,
            prefs,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn with_provider(mut self, name: &str) -> Self {
        self.provider = Some(name.to_string());
        self
    }

    pub fn prefs(&self) -> &PrefsRepository {
        &self.prefs
    }

    /// Classifies `image` and makes the inferred category current.
    ///
    /// Starting another classification makes any pending one stale: it
    /// resolves to `Superseded` and leaves the session untouched. A failed
    /// call also leaves the previous analysis in place. Input that is not an
    /// image is rejected without affecting a pending classification.
    pub async fn classify(&self, image: &[u8]) -> Result<Analysis, ValuationError> {
        let mime = validate::check_image(image)?;
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, mime, "classifying image");

        let result = classifier::classify(image, &self.registry, self.provider.as_deref()).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded classification");
            return Err(ValuationError::Superseded);
        }
        let predictions = result?;
        let category = inference::infer(&predictions);

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded classification");
            return Err(ValuationError::Superseded);
        }
        let analysis = Analysis {
            predictions,
            category,
        };
        state.analysis = Some(analysis.clone());
        state.selected = category;
        info!(%category, "category inferred");
        Ok(analysis)
    }

    pub async fn analysis(&self) -> Option<Analysis> {
        self.state.lock().await.analysis.clone()
    }

    pub async fn category(&self) -> GemCategory {
        self.state.lock().await.selected
    }

    /// Overrides the inferred category.
    pub async fn select_category(&self, category: GemCategory) {
        self.state.lock().await.selected = category;
    }

    /// Prices the current category with the stored currency settings and
    /// records the result. Nothing is written when the weight is invalid.
    pub async fn estimate(
        &self,
        weight_text: &str,
        quality: QualityGrade,
        purity: PurityGrade,
    ) -> Result<PriceEstimate, ValuationError> {
        self.estimate_at(
            weight_text,
            quality,
            purity,
            chrono::Utc::now().timestamp_millis(),
        )
        .await
    }

    pub async fn estimate_at(
        &self,
        weight_text: &str,
        quality: QualityGrade,
        purity: PurityGrade,
        timestamp_millis: i64,
    ) -> Result<PriceEstimate, ValuationError> {
        let weight = validate::parse_weight(weight_text)?;
        let category = self.category().await;
        let currency = self.prefs.currency().await?;
        let rate = self.prefs.rate_to_usd().await?;

        let estimate = pricing::estimate(category, weight, quality, purity, &currency, rate);
        info!(
            %category,
            weight,
            amount = estimate.amount,
            currency = %estimate.currency,
            "estimate computed"
        );

        let entry =
            HistoryEntry::from_estimate(timestamp_millis, category, weight, quality, purity, &estimate);
        self.prefs.add_history(&entry).await?;
        Ok(estimate)
    }
}

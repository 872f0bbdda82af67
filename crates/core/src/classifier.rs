use crate::error::ValuationError;
use crate::models::{LabelPrediction, RankedPredictions};
use providers::{ProviderRegistry, RawLabel};
use tracing::{debug, info};

/// Clamps confidences into `[0, 1]` (NaN becomes 0) and ranks the labels.
pub fn normalize(raw: Vec<RawLabel>) -> RankedPredictions {
    let predictions = raw
        .into_iter()
        .map(|l| LabelPrediction {
            text: l.text,
            confidence: if l.confidence.is_nan() {
                0.0
            } else {
                l.confidence.clamp(0.0, 1.0)
            },
        })
        .collect();
    RankedPredictions::rank(predictions)
}

pub async fn classify(
    image: &[u8],
    registry: &ProviderRegistry,
    provider: Option<&str>,
) -> Result<RankedPredictions, ValuationError> {
    let labeler = registry.labeler(provider)?;
    debug!(bytes = image.len(), "requesting labels");
    let raw = labeler.label(image).await?;
    let ranked = normalize(raw);
    info!(labels = ranked.len(), "classification complete");
    Ok(ranked)
}

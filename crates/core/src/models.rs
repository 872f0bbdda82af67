use crate::grades::{GemCategory, PurityGrade, QualityGrade};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrediction {
    pub text: String,
    /// Always within `[0, 1]`.
    pub confidence: f32,
}

/// Predictions of one classification call, highest confidence first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedPredictions(Vec<LabelPrediction>);

impl RankedPredictions {
    /// Ranks predictions by descending confidence. Equal confidences keep the
    /// order the classifier reported them in.
    pub fn rank(mut predictions: Vec<LabelPrediction>) -> Self {
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Self(predictions)
    }

    pub fn as_slice(&self) -> &[LabelPrediction] {
        &self.0
    }

    pub fn top(&self, n: usize) -> &[LabelPrediction] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RankedPredictions {
    type Item = LabelPrediction;
    type IntoIter = std::vec::IntoIter<LabelPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub currency: String,
    pub amount: f64,
    pub per_carat: f64,
}

/// One recorded valuation, as stored in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp_millis: i64,
    pub category_label: String,
    pub weight_carat: f64,
    pub quality: String,
    pub purity: String,
    pub currency: String,
    pub estimated_value: f64,
    pub per_carat: f64,
}

impl HistoryEntry {
    pub fn from_estimate(
        timestamp_millis: i64,
        category: GemCategory,
        weight_carat: f64,
        quality: QualityGrade,
        purity: PurityGrade,
        estimate: &PriceEstimate,
    ) -> Self {
        Self {
            timestamp_millis,
            category_label: category.label().to_string(),
            weight_carat,
            quality: quality.code().to_string(),
            purity: purity.code().to_string(),
            currency: estimate.currency.clone(),
            estimated_value: estimate.amount,
            per_carat: estimate.per_carat,
        }
    }

    pub fn category(&self) -> Option<GemCategory> {
        GemCategory::from_label(&self.category_label)
    }

    pub fn quality_grade(&self) -> Option<QualityGrade> {
        QualityGrade::from_code(&self.quality)
    }

    pub fn purity_grade(&self) -> Option<PurityGrade> {
        PurityGrade::from_code(&self.purity)
    }
}

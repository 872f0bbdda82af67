use crate::{LabelProvider, ProviderError, RawLabel};

/// Serves the same label set for every image. Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedLabelProvider {
    labels: Vec<RawLabel>,
}

impl FixedLabelProvider {
    pub fn new(labels: Vec<RawLabel>) -> Self {
        Self { labels }
    }
}

#[async_trait::async_trait]
impl LabelProvider for FixedLabelProvider {
    async fn label(&self, _image: &[u8]) -> Result<Vec<RawLabel>, ProviderError> {
        Ok(self.labels.clone())
    }
}

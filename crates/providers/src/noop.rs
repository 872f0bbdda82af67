use crate::{LabelProvider, ProviderError, RawLabel};

#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl LabelProvider for NoopProvider {
    async fn label(&self, _image: &[u8]) -> Result<Vec<RawLabel>, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}

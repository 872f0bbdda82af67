use crate::{LabelProvider, ProviderError, RawLabel};
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct HttpLabelConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Talks to a label service that accepts raw image bytes and answers
/// `{"labels": [{"text": .., "confidence": ..}]}`.
#[derive(Clone)]
pub struct HttpLabelProvider {
    client: Client,
    cfg: Arc<HttpLabelConfig>,
}

impl HttpLabelProvider {
    pub fn new(cfg: HttpLabelConfig) -> Self {
        Self {
            client: Client::new(),
            cfg: Arc::new(cfg),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/labels", self.cfg.base_url.trim_end_matches('/'))
    }
}

#[derive(Deserialize)]
struct LabelApiResponse {
    labels: Vec<RawLabel>,
}

pub(crate) fn parse_labels(body: &str) -> Result<Vec<RawLabel>, ProviderError> {
    let parsed: LabelApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
    Ok(parsed.labels)
}

#[async_trait::async_trait]
impl LabelProvider for HttpLabelProvider {
    async fn label(&self, image: &[u8]) -> Result<Vec<RawLabel>, ProviderError> {
        let mut req = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(Bytes::copy_from_slice(image));
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(ProviderError::RequestFailed(format!("{status}: {body}")));
        }

        let labels = parse_labels(&body)?;
        debug!(count = labels.len(), "label service responded");
        Ok(labels)
    }
}

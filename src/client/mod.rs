pub mod error;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::model::{AnalysisRequest, AnalysisResult};

pub use error::{AnalyzeError, CONNECTION_MESSAGE, SERVICE_FALLBACK_MESSAGE};

/// Anything that can turn a request into a verdict. The session only talks
/// to this trait, so tests can swap the HTTP client out.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError>;
}

/// HTTP client for the external analysis service.
#[derive(Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("newslens/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        Self::new(config.base_url.clone())
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// One `POST /analyze`, no retry.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let url = self.endpoint("/analyze");
        debug!(
            url = url.as_str(),
            chars = request.char_count(),
            "sending analysis request"
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(url = url.as_str(), error = %err, "analysis service unreachable");
                AnalyzeError::transport(err)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(AnalyzeError::transport)?;

        if !status.is_success() {
            let err = AnalyzeError::from_rejection(status.as_u16(), &body);
            warn!(
                status = status.as_u16(),
                reason = %err,
                "analysis service rejected request"
            );
            return Err(err);
        }

        let result: AnalysisResult = serde_json::from_slice(&body).map_err(|err| {
            warn!(
                status = status.as_u16(),
                error = %err,
                "analysis response did not match the expected shape"
            );
            AnalyzeError::Protocol(err.to_string())
        })?;

        info!(
            label = result.label.as_str(),
            trust_score = result.trust_score,
            explanations = result.explanations.len(),
            sources = result.sources.len(),
            "analysis response received"
        );
        Ok(result)
    }

    /// `GET /health`; any 2xx is healthy, everything else is not.
    pub async fn check_health(&self) -> bool {
        let url = self.endpoint("/health");
        match self.http.get(&url).send().await {
            Ok(resp) => {
                let healthy = resp.status().is_success();
                debug!(status = resp.status().as_u16(), healthy, "health probe");
                healthy
            }
            Err(err) => {
                debug!(error = %err, "health probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        self.submit(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = AnalysisClient::new("http://localhost:5000//").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint("/analyze"), "http://localhost:5000/analyze");
    }
}

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, error, info};

use super::AnalysisError;
use super::types::{AnalysisResult, extract_detail};
use crate::form::ParameterSet;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze_project";

/// The remote analysis engine, seen from the form.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, params: &ParameterSet) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    pub endpoint: String,
    pub(crate) inner: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!("cbuild/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            inner,
        })
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, params: &ParameterSet) -> Result<AnalysisResult, AnalysisError> {
        // Values are not logged: the set carries the provider API key.
        let fields: Vec<&str> = params.keys().collect();
        debug!(endpoint = %self.endpoint, ?fields, "sending analysis request");

        let resp = self
            .inner
            .post(&self.endpoint)
            .headers(Self::headers())
            .json(params)
            .send()
            .await
            .map_err(|e| {
                error!(err = %e, "analysis request send error");
                AnalysisError::Transport(e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            error!(err = %e, "analysis response read error");
            AnalysisError::Transport(e)
        })?;

        if !status.is_success() {
            // The raw body can echo the request (api_key included); log the detail only.
            let detail = extract_detail(&body);
            error!(status = %status.as_u16(), detail = ?detail, "analysis request rejected");
            return Err(AnalysisError::Server { status, detail });
        }

        let result: AnalysisResult = serde_json::from_str(&body).map_err(|e| {
            error!(err = %e, "analysis response deserialize error");
            AnalysisError::Decode(e)
        })?;
        info!(
            status = ?result.feasibility_status,
            duration = ?result.total_duration,
            "analysis response received"
        );
        Ok(result)
    }
}

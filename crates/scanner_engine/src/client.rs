use std::time::Duration;

use serde::Serialize;

use crate::{AnalysisReport, AnalyzeError, ReportLanguage};

#[derive(Debug, Clone)]
pub struct AnalystSettings {
    /// Full URL of the analysis endpoint.
    pub endpoint: String,
    /// Bearer token; absent means unauthenticated (local gateways).
    pub api_key: Option<String>,
    /// Model identifier forwarded to the inference service.
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for AnalystSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8787/v1/analyze".to_string(),
            api_key: None,
            model: "gemini-pro".to_string(),
            connect_timeout: Duration::from_secs(10),
            // The inference call is slow by nature; give it room.
            request_timeout: Duration::from_secs(90),
        }
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    asset: &'a str,
    language: ReportLanguage,
    model: &'a str,
}

#[async_trait::async_trait]
pub trait Analyst: Send + Sync {
    async fn analyze(
        &self,
        asset: &str,
        language: ReportLanguage,
    ) -> Result<AnalysisReport, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnalyst {
    settings: AnalystSettings,
}

impl HttpAnalyst {
    pub fn new(settings: AnalystSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalyzeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AnalyzeError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl Analyst for HttpAnalyst {
    async fn analyze(
        &self,
        asset: &str,
        language: ReportLanguage,
    ) -> Result<AnalysisReport, AnalyzeError> {
        let url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| AnalyzeError::InvalidEndpoint(err.to_string()))?;
        let client = self.build_client()?;

        let body = AnalyzeRequest {
            asset,
            language,
            model: &self.settings.model,
        };
        let mut request = client.post(url).json(&body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::HttpStatus(status.as_u16()));
        }

        response
            .json::<AnalysisReport>()
            .await
            .map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        return AnalyzeError::Timeout;
    }
    if err.is_decode() {
        return AnalyzeError::MalformedResponse(err.to_string());
    }
    AnalyzeError::Network(err.to_string())
}

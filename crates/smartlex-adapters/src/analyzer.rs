use anyhow::Result;
use async_trait::async_trait;

use protocol::{AnalysisError, AnalysisRequest, AnalysisResult};
use smartlex_core::ports::AnalyzerPort;

/// Routes analysis requests to the Gemini API.
pub struct GeminiAnalyzer {
    client: gemini::Client,
}

impl GeminiAnalyzer {
    pub fn new(client: gemini::Client) -> Self {
        Self { client }
    }

    pub fn from_env(model: &str) -> Result<Self> {
        Ok(Self::new(gemini::Client::from_env(model)?))
    }
}

#[async_trait]
impl AnalyzerPort for GeminiAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.client.analyze(request).await
    }
}

use std::sync::Arc;
use std::time::Duration;

use super::gemini::{DEFAULT_GEMINI_BASE_URL, GeminiProvider};
use super::http_client::HttpClient;
use crate::domain::{DomainError, LlmProvider};

/// Settings for building the model provider
#[derive(Debug, Clone, PartialEq)]
pub struct LlmProviderConfig {
    pub base_url: String,
    /// Hard ceiling on a single HTTP exchange; the search timeout normally fires first
    pub http_timeout: Duration,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(60),
        }
    }
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the Gemini provider from configuration
    pub fn create(config: &LlmProviderConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(config.http_timeout)?;
        Ok(Arc::new(GeminiProvider::with_base_url(
            http_client,
            config.base_url.clone(),
        )))
    }

    /// Create a Gemini provider against the public endpoint
    pub fn create_gemini() -> Arc<dyn LlmProvider> {
        Arc::new(GeminiProvider::new(HttpClient::new()))
    }
}

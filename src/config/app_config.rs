use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use crate::domain::{CachePolicy, PromptSettings};
use crate::infrastructure::llm::{DEFAULT_GEMINI_BASE_URL, LlmProviderConfig};
use crate::infrastructure::services::{QueryServiceConfig, SearchOrchestratorConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub gemini: GeminiConfig,
    #[validate(nested)]
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct GeminiConfig {
    /// Falls back to `GEMINI_API_KEY` / `VITE_GEMINI_API_KEY` when unset
    pub api_key: Option<String>,
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 1))]
    pub top_k: u32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: f32,
    #[validate(range(min = 256))]
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct SearchConfig {
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub min_loading_ms: u64,
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
    pub debounce_ms: u64,
    #[validate(range(min = 1, max = 50))]
    pub primary_count: usize,
    #[validate(range(min = 1, max = 50))]
    pub fallback_count: usize,
    #[validate(range(min = 500))]
    pub max_response_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            cache_ttl_secs: 300,
            min_loading_ms: 300,
            page_size: 6,
            debounce_ms: 500,
            primary_count: 12,
            fallback_count: 8,
            max_response_chars: 4000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;

        app_config
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("Invalid configuration: {}", e)))?;

        Ok(app_config)
    }

    pub fn llm_provider_config(&self) -> LlmProviderConfig {
        LlmProviderConfig {
            base_url: self.gemini.base_url.clone(),
            ..Default::default()
        }
    }

    pub fn query_service_config(&self) -> QueryServiceConfig {
        QueryServiceConfig {
            model: self.gemini.model.clone(),
            timeout: Duration::from_secs(self.search.timeout_secs),
            temperature: self.gemini.temperature,
            top_k: self.gemini.top_k,
            top_p: self.gemini.top_p,
            max_output_tokens: self.gemini.max_output_tokens,
            prompts: self.prompt_settings(),
        }
    }

    pub fn prompt_settings(&self) -> PromptSettings {
        PromptSettings {
            primary_count: self.search.primary_count,
            fallback_count: self.search.fallback_count,
            max_response_chars: self.search.max_response_chars,
        }
    }

    pub fn pipeline_cache_policy(&self) -> CachePolicy {
        CachePolicy::pipeline(Duration::from_secs(self.search.cache_ttl_secs))
    }

    pub fn speculative_cache_policy(&self) -> CachePolicy {
        CachePolicy::speculative()
    }

    pub fn orchestrator_config(&self) -> SearchOrchestratorConfig {
        SearchOrchestratorConfig {
            min_loading: Duration::from_millis(self.search.min_loading_ms),
            page_size: self.search.page_size,
            debounce: Duration::from_millis(self.search.debounce_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.gemini.model, "gemini-2.0-flash-exp");
        assert_eq!(config.search.timeout_secs, 15);
        assert_eq!(config.search.page_size, 6);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_derived_settings() {
        let config = AppConfig::default();

        let query = config.query_service_config();
        assert_eq!(query.timeout, Duration::from_secs(15));
        assert_eq!(query.top_k, 40);
        assert_eq!(query.prompts, PromptSettings::default());

        let pipeline = config.pipeline_cache_policy();
        assert_eq!(pipeline.ttl, Some(Duration::from_secs(300)));
        assert_eq!(pipeline.key_strategy, crate::domain::KeyStrategy::Normalized);
        assert_eq!(config.speculative_cache_policy().ttl, None);

        let orchestrator = config.orchestrator_config();
        assert_eq!(orchestrator.min_loading, Duration::from_millis(300));
        assert_eq!(orchestrator.debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let mut config = AppConfig::default();
        config.search.page_size = 0;
        config.gemini.top_p = 1.5;

        let errors = config.validate().unwrap_err().to_string();
        assert!(errors.contains("page_size"));
        assert!(errors.contains("top_p"));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "gemini": {"model": "gemini-1.5-pro"},
            "search": {"timeout_secs": 20},
            "logging": {"format": "json"}
        }))
        .unwrap();

        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.top_k, 40);
        assert_eq!(config.search.timeout_secs, 20);
        assert_eq!(config.search.cache_ttl_secs, 300);
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}

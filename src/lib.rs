//! College Finder
//!
//! Looks up IT and Management colleges for an Indian state or city through a generative
//! text model, with support for:
//! - Strict and permissive parsing of the model's JSON-ish output
//! - A time-bounded query pipeline with a fallback prompt
//! - Per-location result caching and debounced speculative pre-fetch
//! - Paginated presentation in a terminal CLI

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::CredentialProvider;
use infrastructure::{
    cache::InMemoryLocationCache,
    credentials::{ChainCredentialProvider, EnvCredentialProvider, StaticCredentialProvider},
    llm::LlmProviderFactory,
    services::{CollegeQueryService, SearchOrchestrator},
};
use tracing::debug;

/// Credential lookup order: configured key first, then the environment
pub fn create_credential_provider(config: &AppConfig) -> ChainCredentialProvider {
    ChainCredentialProvider::new()
        .with_provider(StaticCredentialProvider::new(config.gemini.api_key.clone()))
        .with_provider(EnvCredentialProvider::default())
}

/// Build the query pipeline with its own result cache
pub fn create_query_service(config: &AppConfig) -> anyhow::Result<CollegeQueryService> {
    let provider = LlmProviderFactory::create(&config.llm_provider_config())?;
    let credentials: Arc<dyn CredentialProvider> = Arc::new(create_credential_provider(config));
    let cache = Arc::new(InMemoryLocationCache::new(config.pipeline_cache_policy()));

    debug!(
        model = %config.gemini.model,
        base_url = %config.gemini.base_url,
        "Query pipeline configured"
    );

    Ok(CollegeQueryService::new(
        provider,
        credentials,
        cache,
        config.query_service_config(),
    ))
}

/// Build a search session on top of a fresh query pipeline
pub fn create_orchestrator(config: &AppConfig) -> anyhow::Result<Arc<SearchOrchestrator>> {
    let query = create_query_service(config)?;
    let speculative = Arc::new(InMemoryLocationCache::new(config.speculative_cache_policy()));

    Ok(Arc::new(SearchOrchestrator::new(
        Arc::new(query),
        speculative,
        config.orchestrator_config(),
    )))
}

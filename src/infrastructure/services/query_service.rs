//! College query pipeline: cache, timed model call, fallback prompt

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::domain::{
    College, Credential, CredentialProvider, DomainError, LlmProvider, LlmRequest, LocationCache,
    Normalizer, PromptKind, PromptSettings,
};

const TIMEOUT_MESSAGE: &str =
    "Search is taking too long. Please try a different location or try again later.";

/// Generation parameters and limits of the query pipeline
#[derive(Debug, Clone)]
pub struct QueryServiceConfig {
    pub model: String,
    /// Upper bound on the whole primary + fallback chain
    pub timeout: Duration,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub prompts: PromptSettings,
}

impl Default for QueryServiceConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".to_string(),
            timeout: Duration::from_secs(15),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
            prompts: PromptSettings::default(),
        }
    }
}

impl QueryServiceConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptSettings) -> Self {
        self.prompts = prompts;
        self
    }
}

/// Trait for fetching colleges for a location
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CollegeQueryServiceTrait: Send + Sync {
    /// Fails only with `Configuration`, `Timeout` or `Upstream`; a cancelled model call
    /// surfaces as `Timeout`
    async fn fetch(&self, location: &str) -> Result<Vec<College>, DomainError>;
}

/// Cached, time-bounded lookup of colleges through a text model
pub struct CollegeQueryService {
    provider: Arc<dyn LlmProvider>,
    credentials: Arc<dyn CredentialProvider>,
    cache: Arc<dyn LocationCache>,
    config: QueryServiceConfig,
}

impl std::fmt::Debug for CollegeQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollegeQueryService")
            .field("provider", &self.provider.provider_name())
            .field("credentials", &self.credentials.provider_name())
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

impl CollegeQueryService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        credentials: Arc<dyn CredentialProvider>,
        cache: Arc<dyn LocationCache>,
        config: QueryServiceConfig,
    ) -> Self {
        Self {
            provider,
            credentials,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &QueryServiceConfig {
        &self.config
    }

    /// Primary prompt with strict parsing, then the fallback prompt with permissive parsing
    async fn run_chain(
        &self,
        credential: &Credential,
        location: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<College>, DomainError> {
        match self
            .attempt(PromptKind::Primary, credential, location, cancel)
            .await
        {
            Ok(colleges) => return Ok(colleges),
            Err(e) if !e.is_recoverable() => return Err(e),
            Err(e) => {
                warn!(location = %location, error = %e, "Primary prompt failed, trying fallback");
            }
        }

        match self
            .attempt(PromptKind::Fallback, credential, location, cancel)
            .await
        {
            Ok(colleges) => Ok(colleges),
            Err(e) if cancel.is_cancelled() => Err(e),
            Err(e) => {
                error!(location = %location, error = %e, "Fallback prompt failed");
                Err(DomainError::upstream(location))
            }
        }
    }

    async fn attempt(
        &self,
        kind: PromptKind,
        credential: &Credential,
        location: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<College>, DomainError> {
        let request = LlmRequest::builder()
            .user(self.config.prompts.build(kind, location))
            .temperature(self.config.temperature)
            .top_k(self.config.top_k)
            .top_p(self.config.top_p)
            .max_tokens(self.config.max_output_tokens)
            .build();

        let response = self
            .provider
            .chat(credential, &self.config.model, request, cancel)
            .await?;

        if response.is_truncated() {
            debug!(
                location = %location,
                prompt = kind.as_str(),
                "Model output hit the token limit"
            );
        }

        let colleges = Normalizer::for_prompt(kind).normalize(response.content(), location)?;

        debug!(
            location = %location,
            prompt = kind.as_str(),
            count = colleges.len(),
            "Parsed colleges from model output"
        );

        Ok(colleges)
    }
}

#[async_trait]
impl CollegeQueryServiceTrait for CollegeQueryService {
    async fn fetch(&self, location: &str) -> Result<Vec<College>, DomainError> {
        let credential = self.credentials.get_credential().await?;

        if let Some(hit) = self.cache.get(location).await {
            info!(
                location = %location,
                age_secs = hit.age.as_secs(),
                count = hit.colleges.len(),
                "Using cached colleges"
            );
            return Ok(hit.colleges);
        }

        info!(location = %location, model = %self.config.model, "Querying model for colleges");

        let cancel = CancellationToken::new();
        let chain = self.run_chain(&credential, location, &cancel);
        tokio::pin!(chain);

        let colleges = tokio::select! {
            result = &mut chain => result?,
            _ = tokio::time::sleep(self.config.timeout) => {
                cancel.cancel();
                // Providers return promptly once cancelled; wait so the request is torn down
                let _ = chain.await;

                warn!(
                    location = %location,
                    timeout_secs = self.config.timeout.as_secs(),
                    "College search timed out"
                );
                return Err(DomainError::timeout(TIMEOUT_MESSAGE));
            }
        };

        self.cache.insert(location, colleges.clone()).await;
        info!(location = %location, count = colleges.len(), "Cached college results");

        Ok(colleges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CachePolicy;
    use crate::domain::credentials::MockCredentialProvider;
    use crate::domain::llm::MockLlmProvider;
    use crate::infrastructure::cache::InMemoryLocationCache;
    use crate::infrastructure::credentials::StaticCredentialProvider;

    fn college_json(i: usize) -> serde_json::Value {
        serde_json::json!({
            "name": format!("College {}", i),
            "address": format!("Street {}, Mumbai", i),
            "contactDetails": {"phone": "+91-22-0000", "website": "https://example.edu"},
            "coursesAvailable": ["B.Tech CSE", "MBA"],
            "fees": [{"course": "B.Tech CSE", "amount": "₹2,00,000 per year"}],
            "type": "Both"
        })
    }

    fn primary_reply(count: usize) -> String {
        let entries: Vec<_> = (0..count).map(college_json).collect();
        format!("```json\n{}\n```", serde_json::Value::Array(entries))
    }

    struct Fixture {
        provider: Arc<MockLlmProvider>,
        cache: Arc<InMemoryLocationCache>,
        service: CollegeQueryService,
    }

    fn fixture(provider: MockLlmProvider) -> Fixture {
        let provider = Arc::new(provider);
        let cache = Arc::new(InMemoryLocationCache::new(CachePolicy::pipeline(
            Duration::from_secs(300),
        )));
        let credentials = Arc::new(StaticCredentialProvider::new(Some("AIza-test".to_string())));

        let service = CollegeQueryService::new(
            provider.clone(),
            credentials,
            cache.clone(),
            QueryServiceConfig::default(),
        );

        Fixture {
            provider,
            cache,
            service,
        }
    }

    #[tokio::test]
    async fn test_primary_success_is_cached_under_normalized_key() {
        let f = fixture(MockLlmProvider::new().with_reply(primary_reply(12)));

        let colleges = f.service.fetch("Mumbai").await.unwrap();

        assert_eq!(colleges.len(), 12);
        assert_eq!(f.provider.calls(), 1);
        assert!(f.provider.prompts()[0].contains("Mumbai"));
        assert_eq!(f.cache.get("mumbai").await.unwrap().colleges, colleges);
    }

    #[tokio::test]
    async fn test_repeated_fetch_makes_one_call() {
        let f = fixture(MockLlmProvider::new().with_default_reply(primary_reply(3)));

        let first = f.service.fetch("Mumbai").await.unwrap();
        let second = f.service.fetch("  mumbai ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_triggers_new_call() {
        let f = fixture(MockLlmProvider::new().with_default_reply(primary_reply(3)));

        f.service.fetch("Pune").await.unwrap();
        tokio::time::advance(Duration::from_secs(301)).await;
        f.service.fetch("Pune").await.unwrap();

        assert_eq!(f.provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_truncated_primary_output_is_repaired() {
        let truncated = r#"[{"name":"IIT Bombay","address":"Powai, Mumbai","coursesAvailable":["B.Tech"],"fees":[{"course":"B.Tech","amount":"₹2,30,000"}]},{"name":"VJTI","addr"#;
        let f = fixture(MockLlmProvider::new().with_reply(truncated));

        let colleges = f.service.fetch("Mumbai").await.unwrap();

        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].name, "IIT Bombay");
        assert_eq!(f.provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_unusable_primary_falls_back_to_permissive_prompt() {
        let f = fixture(
            MockLlmProvider::new()
                .with_reply("I could not find any colleges, sorry.")
                .with_reply(r#"[{"name":"Symbiosis","courses":["BBA"],"phone":"020-1234"}]"#),
        );

        let colleges = f.service.fetch("Pune").await.unwrap();

        assert_eq!(f.provider.calls(), 2);
        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].name, "Symbiosis");
        assert_eq!(colleges[0].address, "Pune, India");
        assert_eq!(colleges[0].courses_available, vec!["BBA".to_string()]);

        let prompts = f.provider.prompts();
        assert_ne!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let f = fixture(
            MockLlmProvider::new()
                .with_error("HTTP 503: overloaded")
                .with_reply(primary_reply(2)),
        );

        let colleges = f.service.fetch("Chennai").await.unwrap();

        assert_eq!(colleges.len(), 2);
        assert_eq!(f.provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_both_prompts_failing_is_upstream_error() {
        let f = fixture(MockLlmProvider::new().with_default_reply("no data here"));

        let error = f.service.fetch("Atlantis").await.unwrap_err();

        assert!(matches!(error, DomainError::Upstream { .. }));
        assert!(error.to_string().contains("Atlantis"));
        assert_eq!(f.provider.calls(), 2);
        assert_eq!(f.cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_times_out_and_is_cancelled() {
        let f = fixture(
            MockLlmProvider::new()
                .with_delay(Duration::from_secs(30))
                .with_default_reply(primary_reply(3)),
        );

        let error = f.service.fetch("Delhi").await.unwrap_err();

        assert!(matches!(error, DomainError::Timeout { .. }));
        assert!(error.to_string().contains("try again later"));
        assert_eq!(f.provider.calls(), 1);
        assert_eq!(f.provider.cancellations(), 1);
        assert!(f.cache.get("delhi").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_during_fallback_is_reported_as_timeout() {
        let f = fixture(
            MockLlmProvider::new()
                .with_delay(Duration::from_secs(10))
                .with_reply("not json at all")
                .with_default_reply(primary_reply(3)),
        );

        let error = f.service.fetch("Jaipur").await.unwrap_err();

        assert!(matches!(error, DomainError::Timeout { .. }));
        assert_eq!(f.provider.calls(), 2);
        assert_eq!(f.provider.cancellations(), 1);
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let provider = Arc::new(MockLlmProvider::new().with_default_reply(primary_reply(3)));
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_get_credential()
            .times(1)
            .returning(|| Err(DomainError::configuration("Gemini API key is not configured.")));

        let service = CollegeQueryService::new(
            provider.clone(),
            Arc::new(credentials),
            Arc::new(InMemoryLocationCache::new(CachePolicy::pipeline(
                Duration::from_secs(300),
            ))),
            QueryServiceConfig::default(),
        );

        let error = service.fetch("Mumbai").await.unwrap_err();

        assert!(matches!(error, DomainError::Configuration { .. }));
        assert_eq!(provider.calls(), 0);
    }
}

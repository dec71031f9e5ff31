use async_trait::async_trait;
use std::env;

use crate::domain::{Credential, CredentialProvider, DomainError};

/// Variables checked when no explicit list is given, in order
pub const DEFAULT_API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

/// Credential provider that reads the API key from environment variables on every call
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    vars: Vec<String>,
}

impl EnvCredentialProvider {
    pub fn new(vars: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }

    fn read_credential(&self) -> Result<Credential, DomainError> {
        self.vars
            .iter()
            .find_map(|var| {
                env::var(var)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| Credential::new(value.trim(), var.clone()))
            })
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Gemini API key is not configured. Please set {} in your environment or .env file.",
                    self.vars.join(" or ")
                ))
            })
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_VARS.iter().copied())
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get_credential(&self) -> Result<Credential, DomainError> {
        self.read_credential()
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}

/// Credential provider wrapping a key from configuration; `None` means not configured
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    api_key: Option<String>,
}

impl StaticCredentialProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn get_credential(&self) -> Result<Credential, DomainError> {
        self.api_key
            .as_ref()
            .map(|key| Credential::new(key.trim(), "config"))
            .ok_or_else(|| DomainError::configuration("Gemini API key is not configured."))
    }

    fn provider_name(&self) -> &'static str {
        "static"
    }
}

/// Tries each provider in order and returns the first credential found
pub struct ChainCredentialProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainCredentialProvider {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl Default for ChainCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for ChainCredentialProvider {
    async fn get_credential(&self) -> Result<Credential, DomainError> {
        let mut last_error = None;

        for provider in &self.providers {
            match provider.get_credential().await {
                Ok(credential) => return Ok(credential),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| DomainError::configuration("No credential providers configured")))
    }

    fn provider_name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::MockCredentialProvider;
    use std::env;

    #[tokio::test]
    async fn test_env_provider_with_set_variable() {
        // SAFETY: Test runs in isolation
        unsafe { env::set_var("TEST_COLLEGE_FINDER_KEY", "AIza-test-123") };

        let provider = EnvCredentialProvider::new(["MISSING_COLLEGE_FINDER_KEY", "TEST_COLLEGE_FINDER_KEY"]);

        let cred = provider.get_credential().await.unwrap();
        assert_eq!(cred.api_key(), "AIza-test-123");
        assert_eq!(cred.source(), "TEST_COLLEGE_FINDER_KEY");

        // SAFETY: Test cleanup
        unsafe { env::remove_var("TEST_COLLEGE_FINDER_KEY") };
    }

    #[tokio::test]
    async fn test_env_provider_missing_variable() {
        let provider = EnvCredentialProvider::new(["NONEXISTENT_VAR_12345"]);

        let error = provider.get_credential().await.unwrap_err();
        assert!(matches!(error, DomainError::Configuration { .. }));
        assert!(error.to_string().contains("NONEXISTENT_VAR_12345"));
    }

    #[tokio::test]
    async fn test_static_provider_ignores_blank_key() {
        let provider = StaticCredentialProvider::new(Some("   ".to_string()));
        assert!(provider.get_credential().await.is_err());

        let provider = StaticCredentialProvider::new(Some("AIza-config".to_string()));
        assert_eq!(provider.get_credential().await.unwrap().source(), "config");
    }

    #[tokio::test]
    async fn test_chain_returns_first_success() {
        let mut failing = MockCredentialProvider::new();
        failing
            .expect_get_credential()
            .times(1)
            .returning(|| Err(DomainError::configuration("not set")));

        let mut succeeding = MockCredentialProvider::new();
        succeeding
            .expect_get_credential()
            .times(1)
            .returning(|| Ok(Credential::new("AIza-chain", "mock")));

        let chain = ChainCredentialProvider::new()
            .with_provider(failing)
            .with_provider(succeeding);

        let cred = chain.get_credential().await.unwrap();
        assert_eq!(cred.api_key(), "AIza-chain");
    }

    #[tokio::test]
    async fn test_empty_chain_is_a_configuration_error() {
        let error = ChainCredentialProvider::new().get_credential().await.unwrap_err();
        assert!(matches!(error, DomainError::Configuration { .. }));
    }
}

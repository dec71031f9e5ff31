use async_trait::async_trait;

use super::Credential;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of the model API key (environment, configuration, ...)
///
/// Looked up on every query, so a missing key fails the query rather than startup.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the credential or a configuration error when none is set
    async fn get_credential(&self) -> Result<Credential, DomainError>;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}

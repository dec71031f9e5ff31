use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;
use crate::domain::credentials::Credential;

/// Trait for text-generation providers
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a single generation request.
    ///
    /// Implementations must stop work and return `DomainError::Cancelled` once `cancel`
    /// fires, tearing down any in-flight connection.
    async fn chat(
        &self,
        credential: &Credential,
        model: &str,
        request: LlmRequest,
        cancel: &CancellationToken,
    ) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

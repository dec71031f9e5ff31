use thiserror::Error;

/// Core domain errors
///
/// Only `Configuration`, `Timeout` and `Upstream` leave the query pipeline. `Parse`,
/// `EmptyResult`, `Provider` and `Cancelled` are absorbed by the fallback prompt.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Empty result: {message}")]
    EmptyResult { message: String },

    #[error("Search timeout: {message}")]
    Timeout { message: String },

    #[error("{message}")]
    Upstream { location: String, message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Request cancelled: {message}")]
    Cancelled { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::EmptyResult {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Both the primary and the fallback prompt failed for `location`
    pub fn upstream(location: impl Into<String>) -> Self {
        let location = location.into();
        let message = format!(
            "Unable to find colleges in {}. Please check your internet connection and API key, \
             or try a different location.",
            location
        );

        Self::Upstream { location, message }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Whether the fallback prompt should absorb this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::EmptyResult { .. } | Self::Provider { .. }
        )
    }
}

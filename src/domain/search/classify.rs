//! Mapping pipeline failures to the messages shown to the user

use crate::domain::DomainError;

/// User-facing category of a failed search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connectivity,
    Timeout,
    Generic,
}

impl ErrorCategory {
    /// Typed timeouts first, then keyword matching on the error text
    pub fn classify(error: &DomainError) -> Self {
        if matches!(error, DomainError::Timeout { .. }) {
            return ErrorCategory::Timeout;
        }

        let message = error.to_string().to_lowercase();

        if message.contains("network") || message.contains("fetch") {
            ErrorCategory::Connectivity
        } else if message.contains("timeout") || message.contains("timed out") {
            ErrorCategory::Timeout
        } else {
            ErrorCategory::Generic
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::Connectivity => {
                "Network connection issue. Please check your internet connection and try again."
            }
            ErrorCategory::Timeout => {
                "Search is taking longer than expected. Please try again with a different location."
            }
            ErrorCategory::Generic => {
                "Unable to search colleges right now. Please try again in a moment."
            }
        }
    }
}

/// Message for a search that succeeded without any colleges
pub fn no_results_message(location: &str) -> String {
    format!(
        "No colleges found in {}. Please try a different location or check the spelling.",
        location
    )
}

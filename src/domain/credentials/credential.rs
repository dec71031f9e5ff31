use std::fmt;

use chrono::{DateTime, Utc};

/// API key for the generative model, with where it was read from
#[derive(Clone)]
pub struct Credential {
    api_key: String,
    source: String,
    fetched_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(api_key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            source: source.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Where the key came from, e.g. the environment variable name
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// First 8 and last 4 characters, for diagnostics
    pub fn masked(&self) -> String {
        mask_key(&self.api_key)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .field("fetched_at", &self.fetched_at)
            .finish()
    }
}

pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();

    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_creation() {
        let cred = Credential::new("AIzaSyExampleKey1234", "GEMINI_API_KEY");

        assert_eq!(cred.api_key(), "AIzaSyExampleKey1234");
        assert_eq!(cred.source(), "GEMINI_API_KEY");
        assert!(cred.fetched_at() <= Utc::now());
    }

    #[test]
    fn test_debug_redacts_key() {
        let cred = Credential::new("AIzaSyExampleKey1234", "config");
        let debug = format!("{:?}", cred);

        assert!(!debug.contains("AIzaSyExampleKey1234"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_masked_key() {
        assert_eq!(mask_key("AIzaSyExampleKey1234"), "AIzaSyEx...1234");
        assert_eq!(mask_key("short"), "*****");
    }
}

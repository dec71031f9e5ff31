//! Doctor command - credential status and effective settings

use crate::config::AppConfig;
use crate::domain::{Credential, CredentialProvider};

use super::bootstrap;

/// Print diagnostics
pub async fn run() -> anyhow::Result<()> {
    let config = bootstrap()?;
    let credential = crate::create_credential_provider(&config)
        .get_credential()
        .await
        .ok();

    print!("{}", report(&config, credential.as_ref()));

    Ok(())
}

fn report(config: &AppConfig, credential: Option<&Credential>) -> String {
    let (status, masked, source) = match credential {
        Some(credential) => (
            "Configured",
            credential.masked(),
            credential.source().to_string(),
        ),
        None => ("Missing", "Not set".to_string(), "-".to_string()),
    };

    format!(
        "API key:        {status}\n\
         Key:            {masked}\n\
         Key source:     {source}\n\
         Model:          {model}\n\
         Endpoint:       {base_url}\n\
         Search timeout: {timeout}s\n\
         Cache TTL:      {ttl}s\n\
         Page size:      {page_size}\n",
        model = config.gemini.model,
        base_url = config.gemini.base_url,
        timeout = config.search.timeout_secs,
        ttl = config.search.cache_ttl_secs,
        page_size = config.search.page_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_masks_key() {
        let credential = Credential::new("AIzaSyD-1234567890abcdWXYZ", "GEMINI_API_KEY");
        let out = report(&AppConfig::default(), Some(&credential));

        assert!(out.contains("API key:        Configured"));
        assert!(out.contains("AIzaSyD-...WXYZ"));
        assert!(!out.contains("1234567890"));
        assert!(out.contains("Key source:     GEMINI_API_KEY"));
        assert!(out.contains("Search timeout: 15s"));
    }

    #[test]
    fn test_report_missing_key() {
        let out = report(&AppConfig::default(), None);

        assert!(out.contains("API key:        Missing"));
        assert!(out.contains("Key:            Not set"));
    }
}

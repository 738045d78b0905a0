//! Client configuration: which API endpoint to talk to and with what token.

use std::fmt;

/// Public GitHub REST v3 endpoint.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// Environment variable overriding the API endpoint (e.g. GitHub Enterprise).
pub const ENDPOINT_ENV: &str = "GITHUB_API_ENDPOINT";

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Clone, PartialEq, Eq)]
pub struct TokenConfiguration {
    pub api_endpoint: String,
    pub access_token: Option<String>,
}

impl TokenConfiguration {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, api_endpoint: &str) -> Self {
        self.api_endpoint = api_endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Read `GITHUB_API_ENDPOINT` and `GITHUB_TOKEN`. Unset or empty
    /// variables keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut configuration = Self::default();
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            configuration = configuration.with_endpoint(&endpoint);
        }
        configuration.access_token = lookup(TOKEN_ENV).filter(|v| !v.is_empty());
        configuration
    }
}

impl Default for TokenConfiguration {
    fn default() -> Self {
        Self {
            api_endpoint: GITHUB_API_ENDPOINT.to_string(),
            access_token: None,
        }
    }
}

// Keeps the token out of logs.
impl fmt::Debug for TokenConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfiguration")
            .field("api_endpoint", &self.api_endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_targets_public_api_without_token() {
        let configuration = TokenConfiguration::default();
        assert_eq!(configuration.api_endpoint, "https://api.github.com");
        assert!(configuration.access_token.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let configuration = TokenConfiguration::new("t").with_endpoint("http://localhost:3000/");
        assert_eq!(configuration.api_endpoint, "http://localhost:3000");
        assert_eq!(configuration.access_token.as_deref(), Some("t"));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let env = HashMap::from([
            (ENDPOINT_ENV, "https://ghe.example.com/api/v3/"),
            (TOKEN_ENV, "secret"),
        ]);
        let configuration =
            TokenConfiguration::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(configuration.api_endpoint, "https://ghe.example.com/api/v3");
        assert_eq!(configuration.access_token.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_variables_are_ignored() {
        let configuration = TokenConfiguration::from_lookup(|_| Some(String::new()));
        assert_eq!(configuration, TokenConfiguration::default());
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", TokenConfiguration::new("secret"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

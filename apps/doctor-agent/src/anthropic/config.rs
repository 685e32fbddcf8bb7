use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::AgentError;

/// Default Anthropic API base URL
pub const ANTHROPIC_DEFAULT_BASE: &str = "https://api.anthropic.com";
/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const HDR_ANTHROPIC_VERSION: &str = "anthropic-version";
const HDR_X_API_KEY: &str = "x-api-key";

/// Connection settings for the Messages API.
#[derive(Clone)]
pub struct AnthropicConfig {
    api_base: String,
    version: String,
    api_key: SecretString,
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_base", &self.api_base)
            .field("version", &self.version)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AnthropicConfig {
    /// Build a config around an API key. The base URL comes from
    /// `ANTHROPIC_BASE_URL` when set.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_base: env_trimmed("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| ANTHROPIC_DEFAULT_BASE.into()),
            version: ANTHROPIC_VERSION.into(),
            api_key,
        }
    }

    /// Read `ANTHROPIC_API_KEY`. `None` when it is unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        env_trimmed("ANTHROPIC_API_KEY").map(|k| Self::new(SecretString::from(k)))
    }

    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap, AgentError> {
        let mut h = HeaderMap::new();
        h.insert(
            HDR_ANTHROPIC_VERSION,
            HeaderValue::from_str(&self.version)
                .map_err(|_| AgentError::Config("Invalid anthropic-version header".into()))?,
        );
        h.insert(
            HDR_X_API_KEY,
            HeaderValue::from_str(self.api_key.expose_secret())
                .map_err(|_| AgentError::Config("Invalid x-api-key value".into()))?,
        );
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(h)
    }
}

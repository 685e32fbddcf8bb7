use serde::de::DeserializeOwned;

use crate::{config::Config, error::NppesError};

/// NPPES registry client
///
/// The client is generic over a [`Config`] implementation that provides the
/// endpoint and timeouts. Every call is a single attempt; the registry is
/// never retried.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::NppesConfig> {
    /// Creates a new client with default configuration
    ///
    /// Reads `NPPES_BASE_URL` and `NPPES_TIMEOUT_SECS` from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, NppesError> {
        Self::with_config(crate::config::NppesConfig::new())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: C) -> Result<Self, NppesError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| NppesError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Replaces the HTTP client with a custom one
    ///
    /// The per-request timeout from the configuration still applies.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O>(&self, path: &str, params: &[(&str, String)]) -> Result<O, NppesError>
    where
        O: DeserializeOwned,
    {
        let url = self.config.url(path);
        tracing::debug!(%url, ?params, "registry request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .timeout(self.config.request_timeout())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "registry response");

        if !status.is_success() {
            return Err(crate::error::api_error(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }
}

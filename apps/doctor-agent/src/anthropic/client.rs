use serde::de::DeserializeOwned;

use super::config::AnthropicConfig;
use super::types::{MessagesRequest, MessagesResponse};
use crate::error::{AgentError, api_error};

/// HTTP client for `/v1/messages`.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    http: reqwest::Client,
    config: AnthropicConfig,
}

impl MessagesClient {
    pub fn new(config: AnthropicConfig) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(600))
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    /// Create a message.
    pub async fn create(&self, req: &MessagesRequest) -> Result<MessagesResponse, AgentError> {
        if req.max_tokens == 0 {
            return Err(AgentError::Config(
                "max_tokens must be greater than 0".into(),
            ));
        }
        self.post("/v1/messages", req).await
    }

    async fn post<O: DeserializeOwned>(
        &self,
        path: &str,
        body: &MessagesRequest,
    ) -> Result<O, AgentError> {
        let response = self
            .http
            .post(self.config.url(path))
            .headers(self.config.headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            let snippet: String = String::from_utf8_lossy(&bytes).chars().take(200).collect();
            AgentError::Serde(format!("{e}: {snippet}"))
        })
    }
}

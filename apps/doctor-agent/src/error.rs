use thiserror::Error;

/// Errors from a conversation turn.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Gave up after {0} tool rounds without a final answer")]
    MaxIterations(usize),

    #[error("The model returned an empty reply")]
    EmptyReply,
}

/// Pull the message out of an Anthropic error body, falling back to the raw text.
pub(crate) fn api_error(status: reqwest::StatusCode, bytes: &[u8]) -> AgentError {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(serde::Deserialize)]
    struct Detail {
        message: String,
    }

    let message = serde_json::from_slice::<Envelope>(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).trim().to_string(),
        |env| env.error.message,
    );
    AgentError::Api {
        status: status.as_u16(),
        message,
    }
}

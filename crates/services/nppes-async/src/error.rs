use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::RegistryErrorEntry;

/// Maximum number of body bytes carried into error messages
const BODY_SNIPPET_LEN: usize = 400;

/// Errors that can occur when using the NPPES client
#[derive(Debug, Error)]
pub enum NppesError {
    /// HTTP transport error (connect failure, timeout, body read)
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success HTTP status returned by the registry
    #[error("API error: {0}")]
    Api(ApiErrorObject),

    /// The registry answered 200 but rejected the query in its `Errors` array
    #[error("Registry rejected query: {}", describe_registry_errors(.0))]
    Registry(Vec<RegistryErrorEntry>),

    /// Configuration error (e.g., the HTTP client could not be built)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Error details for a non-success HTTP response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    pub status_code: u16,
    /// Response body snippet (the registry answers plain text or HTML on errors)
    pub message: String,
}

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "status {}", self.status_code)
        } else {
            write!(f, "status {}: {}", self.status_code, self.message)
        }
    }
}

impl NppesError {
    /// Whether the failure happened before a well-formed body was received
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Reqwest(_) | Self::Api(_) | Self::Registry(_))
    }

    /// Whether the failure is a request timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Reqwest(e) if e.is_timeout())
    }
}

fn describe_registry_errors(entries: &[RegistryErrorEntry]) -> String {
    if entries.is_empty() {
        return "no details".to_string();
    }
    entries
        .iter()
        .map(|e| match (e.description.as_deref(), e.field.as_deref()) {
            (Some(desc), Some(field)) => format!("{desc} (field: {field})"),
            (Some(desc), None) => desc.to_string(),
            (None, Some(field)) => format!("invalid field: {field}"),
            (None, None) => "unspecified error".to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn body_snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(&body[..body.len().min(BODY_SNIPPET_LEN)])
        .trim()
        .to_string()
}

/// Maps a serde deserialization error to an `NppesError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> NppesError {
    NppesError::Serde(format!("{e}: {}", body_snippet(body)))
}

/// Builds an API error from a non-success response
#[must_use]
pub fn api_error(status: StatusCode, body: &[u8]) -> NppesError {
    NppesError::Api(ApiErrorObject {
        status_code: status.as_u16(),
        message: body_snippet(body),
    })
}

//! UI resources served next to the tools.

use std::path::{Path, PathBuf};

use rmcp::model as m;
use serde_json::json;

/// URI of the doctor card template.
pub const DOCTOR_CARD_URI: &str = "ui://doctor_card";

/// Served when the template file cannot be read.
pub const FALLBACK_HTML: &str = "<h1>Error: UI Template not found</h1>";

const HTML_MIME: &str = "text/html";

/// An HTML template read from disk on every request.
#[derive(Clone, Debug)]
pub struct UiResource {
    uri: String,
    name: String,
    description: String,
    path: PathBuf,
}

impl UiResource {
    /// The doctor card backed by the template at `path`.
    #[must_use]
    pub fn doctor_card(path: impl Into<PathBuf>) -> Self {
        Self {
            uri: DOCTOR_CARD_URI.to_string(),
            name: "doctor_card".to_string(),
            description: "HTML card for rendering search_doctors results".to_string(),
            path: path.into(),
        }
    }

    /// Resource URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Template path on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the template, substituting [`FALLBACK_HTML`] when it is missing.
    pub async fn load(&self) -> String {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "UI template unavailable");
                FALLBACK_HTML.to_string()
            }
        }
    }

    pub(crate) fn listing(&self) -> Result<m::Resource, m::ErrorData> {
        from_json(json!({
            "uri": self.uri,
            "name": self.name,
            "title": "Doctor Card",
            "description": self.description,
            "mimeType": HTML_MIME,
        }))
    }

    pub(crate) fn template(&self) -> Result<m::ResourceTemplate, m::ErrorData> {
        from_json(json!({
            "uriTemplate": self.uri,
            "name": self.name,
            "title": "Doctor Card",
            "description": self.description,
            "mimeType": HTML_MIME,
        }))
    }

    pub(crate) async fn read(&self) -> Result<m::ReadResourceResult, m::ErrorData> {
        let text = self.load().await;
        from_json(json!({
            "contents": [{
                "uri": self.uri,
                "mimeType": HTML_MIME,
                "text": text,
            }]
        }))
    }
}

fn from_json<T: serde::de::DeserializeOwned>(v: serde_json::Value) -> Result<T, m::ErrorData> {
    serde_json::from_value(v).map_err(|e| m::ErrorData::internal_error(e.to_string(), None))
}

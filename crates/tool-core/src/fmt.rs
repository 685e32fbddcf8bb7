//! Text formatting for tool outputs.
//!
//! MCP text content and the agent's tool results both need a human-readable
//! rendering next to the JSON data. Output types implement [`TextFormat`];
//! the default rendering is pretty-printed JSON.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Options controlling text formatting behavior.
#[derive(Clone, Debug, Default)]
pub struct TextOptions {
    /// Whether to wrap output in markdown formatting.
    pub markdown: bool,
    /// Maximum number of items to display in collections.
    pub max_items: Option<usize>,
}

impl TextOptions {
    /// Create new text options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable markdown formatting.
    #[must_use]
    pub const fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Set the maximum number of items to display.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }
}

/// Human-readable rendering of a tool output.
///
/// Override `fmt_text` for a custom rendering; the default pretty-prints the
/// serialized value.
pub trait TextFormat: Serialize {
    /// Format the value as human-readable text.
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        serde_json::to_value(self)
            .map(|v| fallback_text_from_json(&v))
            .unwrap_or_else(|e| format!("<unrenderable output: {e}>"))
    }
}

impl TextFormat for String {
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        self.clone()
    }
}

impl TextFormat for JsonValue {}

/// Pretty JSON, or compact JSON if pretty-printing fails.
#[must_use]
pub fn fallback_text_from_json(v: &JsonValue) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_options_builder() {
        let opts = TextOptions::new()
            .with_markdown(true)
            .with_max_items(Some(10));

        assert!(opts.markdown);
        assert_eq!(opts.max_items, Some(10));
        assert!(TextOptions::default().max_items.is_none());
    }

    #[test]
    fn test_fallback_text_from_json_object() {
        let v = serde_json::json!({"name": "test", "count": 42});
        let text = fallback_text_from_json(&v);
        assert!(text.contains("\"name\": \"test\""));
        assert!(text.contains("\"count\": 42"));
    }

    #[test]
    fn test_fallback_text_from_json_null() {
        assert_eq!(fallback_text_from_json(&serde_json::json!(null)), "null");
    }

    #[test]
    fn test_default_impl_pretty_prints() {
        #[derive(Serialize)]
        struct Counted {
            count: usize,
        }
        impl TextFormat for Counted {}

        let text = Counted { count: 3 }.fmt_text(&TextOptions::default());
        assert_eq!(text, "{\n  \"count\": 3\n}");
    }

    #[test]
    fn test_custom_impl() {
        #[derive(Serialize)]
        struct Greeting {
            message: String,
        }

        impl TextFormat for Greeting {
            fn fmt_text(&self, _opts: &TextOptions) -> String {
                format!("Message: {}", self.message)
            }
        }

        let output = Greeting {
            message: "Hello".to_string(),
        };
        assert_eq!(output.fmt_text(&TextOptions::default()), "Message: Hello");
    }
}

//! Anthropic tool schema renderer.

use crate::registry::ToolRegistry;
use schemars::Schema;
use serde_json::{Value, json};

/// Render a tool as an Anthropic tool definition.
///
/// ```json
/// { "name": "...", "description": "...", "strict": true, "input_schema": { ... } }
/// ```
#[must_use]
pub fn render_tool(name: &str, description: &str, input_schema: &Schema, strict: bool) -> Value {
    json!({
        "name": name,
        "description": description,
        "strict": strict,
        "input_schema": input_schema.as_value(),
    })
}

/// Render every tool in the registry, in name order.
#[must_use]
pub fn render_registry(registry: &ToolRegistry, strict: bool) -> Vec<Value> {
    registry
        .iter()
        .map(|t| render_tool(t.name(), t.description(), &t.input_schema(), strict))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(schemars::JsonSchema)]
    #[allow(dead_code)]
    struct TestInput {
        query: String,
    }

    #[test]
    fn test_render_tool() {
        let schema = schemars::schema_for!(TestInput);
        let rendered = render_tool("search", "Search for something", &schema, true);

        assert_eq!(rendered["name"], "search");
        assert_eq!(rendered["description"], "Search for something");
        assert_eq!(rendered["strict"], true);
        assert_eq!(rendered["input_schema"]["properties"]["query"]["type"], "string");
    }

    #[test]
    fn test_render_empty_registry() {
        let registry = ToolRegistry::builder().finish();
        assert!(render_registry(&registry, false).is_empty());
    }
}

//! Tool execution context.

/// Context passed to tool executions.
///
/// Carries the name of the host that dispatched the call so tools can tag
/// their log lines.
#[derive(Clone, Debug)]
pub struct ToolContext {
    host: &'static str,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self { host: "native" }
    }
}

impl ToolContext {
    /// Create a context for a native (in-process) call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context tagged with the dispatching host, e.g. `"mcp"`.
    #[must_use]
    pub const fn for_host(host: &'static str) -> Self {
        Self { host }
    }

    /// Name of the host that dispatched the call.
    #[must_use]
    pub const fn host(&self) -> &'static str {
        self.host
    }
}

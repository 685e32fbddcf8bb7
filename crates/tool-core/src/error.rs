//! Error type shared by tools and their hosts.

use thiserror::Error;

/// Error type returned by tool operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Invalid input provided to the tool.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error during tool execution.
    #[error("internal error: {0}")]
    Internal(String),

    /// Error from an external service.
    #[error("external service error: {0}")]
    External(String),

    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Create an invalid input error.
    pub fn invalid_input<S: ToString>(s: S) -> Self {
        Self::InvalidInput(s.to_string())
    }

    /// Create an internal error.
    pub fn internal<S: ToString>(s: S) -> Self {
        Self::Internal(s.to_string())
    }

    /// Create an external service error.
    pub fn external<S: ToString>(s: S) -> Self {
        Self::External(s.to_string())
    }

    /// The message without the category prefix.
    ///
    /// Hosts show this to the model, which only needs the cause.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(m) | Self::Internal(m) | Self::External(m) => m.clone(),
            Self::UnknownTool(_) => self.to_string(),
        }
    }
}

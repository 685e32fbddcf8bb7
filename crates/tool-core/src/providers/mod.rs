//! Provider-specific tool definitions.
//!
//! MCP listings are built by the server crate from the same registry entries.

pub mod anthropic;

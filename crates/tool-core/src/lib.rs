//! Core traits and types shared by the doctor-listing tools and their hosts.
//!
//! - [`Tool`]: native-first tool definition with no serde bounds
//! - [`ToolCodec`]: serialization boundary for protocol integration
//! - [`ToolRegistry`]: name-keyed storage with JSON dispatch
//! - [`TextFormat`]: text rendering of tool outputs for MCP and the agent
//! - [`providers`]: provider-specific tool definitions

pub mod context;
pub mod error;
pub mod fmt;
pub mod providers;
pub mod registry;
pub mod schema;
pub mod tool;

pub use context::ToolContext;
pub use error::ToolError;
pub use fmt::{TextFormat, TextOptions, fallback_text_from_json};
pub use registry::{ErasedTool, FormattedResult, ToolRegistry, ToolRegistryBuilder};
pub use tool::{Tool, ToolCodec};

// Re-exported so tool crates need not depend on `futures` for the signature.
pub use futures::future::BoxFuture;

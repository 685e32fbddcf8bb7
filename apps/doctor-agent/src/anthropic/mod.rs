//! Minimal client for the Anthropic Messages API.

mod client;
mod config;
mod types;

pub use client::MessagesClient;
pub use config::{ANTHROPIC_DEFAULT_BASE, ANTHROPIC_VERSION, AnthropicConfig};
pub use types::{
    ContentBlock, ContentBlockParam, MessageContentParam, MessageParam, MessageRole,
    MessagesRequest, MessagesResponse,
};

//! MCP server integration for the doctor-listing tools.
//!
//! [`DoctorServer`] is an rmcp-backed handler that exposes a [`ToolRegistry`]
//! as MCP tools and serves the doctor card HTML as a UI resource.
//!
//! [`ToolRegistry`]: doctor_tool_core::ToolRegistry

mod resources;
mod server;

pub use resources::{DOCTOR_CARD_URI, FALLBACK_HTML, UiResource};
pub use server::{DoctorServer, OutputMode};

pub use rmcp::transport::stdio;
pub use rmcp::{ServerHandler, service::ServiceExt};

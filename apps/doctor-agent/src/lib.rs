//! Terminal assistant that finds doctors through the `search_doctors` tool.
//!
//! [`DoctorAgent`] runs the Messages API tool loop against a
//! [`ToolRegistry`](doctor_tool_core::ToolRegistry); [`repl::run`] drives it
//! from a line-oriented input.

pub mod agent;
pub mod anthropic;
pub mod error;
pub mod instructions;
pub mod repl;

pub use agent::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DoctorAgent};
pub use error::AgentError;

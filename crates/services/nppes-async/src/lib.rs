#![deny(missing_docs)]

//! Async NPPES NPI Registry client with a typed query builder and tolerant response types.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::NppesConfig;
pub use crate::error::{ApiErrorObject, NppesError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, NppesConfig};
}

//! API resource implementations for the NPPES client

/// Search API resource
pub mod search;

pub use search::Search;

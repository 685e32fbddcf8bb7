//! Request and response types for the NPPES registry API

/// Query parameters for the registry search endpoint
pub mod query;
/// Raw registry response types
pub mod response;

pub use query::{API_VERSION, DEFAULT_LIMIT, RegistryQuery};
pub use response::{
    Address, Basic, LOCATION_PURPOSE, NpiNumber, RegistryErrorEntry, RegistryItem,
    RegistryResponse, Taxonomy,
};

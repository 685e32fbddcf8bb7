//! Doctor lookup against the NPPES NPI Registry.
//!
//! [`translator`] turns a [`SearchRequest`] into one registry query and
//! flattens the response into [`DoctorRecord`]s. [`tools`] wraps it as the
//! `search_doctors` tool for the MCP server and the terminal agent.

pub mod error;
pub mod specialty;
pub mod tools;
pub mod translator;
pub mod types;

pub use error::SearchError;
pub use tools::{SearchDoctorsTool, build_registry};
pub use translator::{build_query, flatten_item, flatten_response, search, try_search};
pub use types::{
    DoctorRecord, ErrorResult, PracticeAddress, SearchDoctorsOutput, SearchOutcome, SearchRequest,
};

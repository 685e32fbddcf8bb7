//! Tool trait implementation and registry builder.

use std::sync::Arc;

use doctor_tool_core::{BoxFuture, Tool, ToolContext, ToolError, ToolRegistry};
use nppes_async::{Client, NppesConfig};

use crate::error::SearchError;
use crate::specialty::canonical_taxonomy;
use crate::translator::try_search;
use crate::types::{SearchDoctorsOutput, SearchRequest};

/// Looks up doctors in the NPPES NPI Registry.
#[derive(Clone)]
pub struct SearchDoctorsTool {
    client: Arc<Client<NppesConfig>>,
}

impl SearchDoctorsTool {
    /// Create a tool backed by a shared registry client.
    #[must_use]
    pub const fn new(client: Arc<Client<NppesConfig>>) -> Self {
        Self { client }
    }
}

impl Tool for SearchDoctorsTool {
    type Input = SearchRequest;
    type Output = SearchDoctorsOutput;

    const NAME: &'static str = "search_doctors";
    const DESCRIPTION: &'static str = "Search the NPPES NPI Registry for doctors by name, location (city, state) and specialty. At least one of first_name, last_name, city, state or specialty is required. Returns name, NPI, credential, gender, primary specialty and practice address for each match.";

    fn call(
        &self,
        mut input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let client = Arc::clone(&self.client);
        let host = ctx.host();
        Box::pin(async move {
            input.specialty = input.specialty.as_deref().map(canonical_taxonomy);
            tracing::debug!(host, specialty = ?input.specialty, "search_doctors called");
            let results = try_search(&client, &input)
                .await
                .map_err(map_search_error)?;
            Ok(SearchDoctorsOutput { results })
        })
    }
}

fn map_search_error(e: SearchError) -> ToolError {
    match e {
        SearchError::MissingCriteria => ToolError::invalid_input(e),
        SearchError::Transport(_) | SearchError::Parse(_) => ToolError::external(e),
    }
}

/// Build a `ToolRegistry` containing the doctor search tool.
#[must_use]
pub fn build_registry(client: Arc<Client<NppesConfig>>) -> ToolRegistry {
    ToolRegistry::builder()
        .register::<SearchDoctorsTool, ()>(SearchDoctorsTool::new(client))
        .finish()
}

use crate::{
    client::Client,
    config::Config,
    error::NppesError,
    types::{RegistryQuery, RegistryResponse},
};

/// API resource for the registry search endpoint (`GET /api/`)
pub struct Search<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Search<'c, C> {
    /// Creates a new Search resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Execute a registry search
    ///
    /// A 200 response whose body carries a non-empty `Errors` array is
    /// reported as [`NppesError::Registry`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the registry answers with a
    /// non-success status, the body is not valid JSON, or the registry
    /// rejects the query.
    pub async fn create(&self, query: &RegistryQuery) -> Result<RegistryResponse, NppesError> {
        let resp: RegistryResponse = self.client.get("/", &query.to_params()).await?;

        if let Some(errors) = resp.registry_errors() {
            tracing::warn!(count = errors.len(), "registry rejected query");
            return Err(NppesError::Registry(errors.to_vec()));
        }

        Ok(resp)
    }
}

// Add accessor to client
impl<C: Config> crate::Client<C> {
    /// Returns the Search API resource
    #[must_use]
    pub const fn search(&self) -> Search<'_, C> {
        Search::new(self)
    }
}

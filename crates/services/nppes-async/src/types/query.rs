//! Outbound query parameters for `GET /api/`

/// Registry API version token sent with every request
pub const API_VERSION: &str = "2.1";
/// Number of results requested when the caller does not choose a limit
pub const DEFAULT_LIMIT: u32 = 10;

/// Flag value the registry expects for boolean switches
const FLAG_TRUE: &str = "True";

/// Search parameters for the registry endpoint
///
/// Every name field is optional; `to_params` emits only the ones that are set,
/// in a fixed order, after the version/limit/pretty base parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryQuery {
    version: String,
    limit: u32,
    pretty: bool,
    first_name: Option<String>,
    use_first_name_alias: bool,
    last_name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    taxonomy_description: Option<String>,
}

impl Default for RegistryQuery {
    fn default() -> Self {
        Self {
            version: API_VERSION.to_string(),
            limit: DEFAULT_LIMIT,
            pretty: true,
            first_name: None,
            use_first_name_alias: false,
            last_name: None,
            city: None,
            state: None,
            taxonomy_description: None,
        }
    }
}

impl RegistryQuery {
    /// Creates a query with the base parameters only
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of results
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the provider's first name
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Also match the first name against registered aliases
    #[must_use]
    pub const fn with_first_name_alias(mut self, enabled: bool) -> Self {
        self.use_first_name_alias = enabled;
        self
    }

    /// Sets the provider's last name
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets the practice city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the practice state
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the taxonomy description (registry vocabulary, e.g. "Dermatology")
    #[must_use]
    pub fn with_taxonomy_description(mut self, description: impl Into<String>) -> Self {
        self.taxonomy_description = Some(description.into());
        self
    }

    /// Toggles the registry's pretty-printed output
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the configured result limit
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether at least one search criterion is set
    #[must_use]
    pub const fn has_criteria(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.city.is_some()
            || self.state.is_some()
            || self.taxonomy_description.is_some()
    }

    /// Returns the query as ordered `(name, value)` pairs
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("version", self.version.clone()),
            ("limit", self.limit.to_string()),
        ];
        if self.pretty {
            params.push(("pretty", FLAG_TRUE.to_string()));
        }
        if let Some(v) = &self.first_name {
            params.push(("first_name", v.clone()));
        }
        if self.use_first_name_alias {
            params.push(("use_first_name_alias", FLAG_TRUE.to_string()));
        }
        if let Some(v) = &self.last_name {
            params.push(("last_name", v.clone()));
        }
        if let Some(v) = &self.city {
            params.push(("city", v.clone()));
        }
        if let Some(v) = &self.state {
            params.push(("state", v.clone()));
        }
        if let Some(v) = &self.taxonomy_description {
            params.push(("taxonomy_description", v.clone()));
        }
        params
    }

    /// Looks up a single parameter value by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<String> {
        self.to_params()
            .into_iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }
}

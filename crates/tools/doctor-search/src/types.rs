//! Request and result types for the doctor lookup.

use doctor_tool_core::{TextFormat, TextOptions};
use nppes_async::types::{DEFAULT_LIMIT, NpiNumber};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Input for the `search_doctors` tool.
///
/// At least one of the name, location or specialty fields must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Provider's first name
    #[serde(default)]
    pub first_name: Option<String>,
    /// Provider's last name
    #[serde(default)]
    pub last_name: Option<String>,
    /// City of the practice location
    #[serde(default)]
    pub city: Option<String>,
    /// State of the practice location, usually a 2-letter code such as "TX"
    #[serde(default)]
    pub state: Option<String>,
    /// Specialty as the registry names it, e.g. "Cardiovascular Disease" or "Dermatology"
    #[serde(default)]
    pub specialty: Option<String>,
    /// Maximum number of doctors to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            first_name: None,
            last_name: None,
            city: None,
            state: None,
            specialty: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Practice-location address of a doctor.
///
/// Every field is `null` when the registry lists no practice location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PracticeAddress {
    /// Street line
    pub address_1: Option<String>,
    /// City
    pub city: Option<String>,
    /// State code
    pub state: Option<String>,
    /// ZIP or ZIP+4, as the registry formats it
    pub postal_code: Option<String>,
    /// Practice telephone number
    pub phone: Option<String>,
}

/// One doctor, flattened from a registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DoctorRecord {
    /// First and last name joined by a space
    pub name: String,
    /// National Provider Identifier, exactly as the registry sent it
    pub npi: Option<NpiNumber>,
    /// Credential text such as "MD" or "D.O."
    pub credential: Option<String>,
    /// Gender code ("M" or "F")
    pub gender: Option<String>,
    /// Description of the primary taxonomy
    pub specialty: Option<String>,
    /// Practice location
    pub address: PracticeAddress,
}

/// Error payload returned in place of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResult {
    /// Human-readable failure cause
    pub error: String,
}

impl From<&SearchError> for ErrorResult {
    fn from(e: &SearchError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

/// Outcome of [`crate::search`]: a record list, or an error object.
///
/// Serializes untagged, so callers see either a JSON array or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    /// Matching doctors, possibly empty
    Results(Vec<DoctorRecord>),
    /// Precondition, transport or parse failure
    Error(ErrorResult),
}

impl SearchOutcome {
    /// Whether this outcome is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Output of the `search_doctors` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchDoctorsOutput {
    /// Matching doctors in registry order
    pub results: Vec<DoctorRecord>,
}

impl DoctorRecord {
    fn summary_line(&self) -> String {
        let mut line = if self.name.is_empty() {
            "(unnamed provider)".to_string()
        } else {
            self.name.clone()
        };
        if let Some(cred) = &self.credential {
            line.push_str(", ");
            line.push_str(cred);
        }
        if let Some(npi) = &self.npi {
            line.push_str(&format!(" (NPI {npi})"));
        }
        if let Some(spec) = &self.specialty {
            line.push_str(" - ");
            line.push_str(spec);
        }
        let place = [self.address.city.as_deref(), self.address.state.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        if !place.is_empty() {
            line.push_str(" - ");
            line.push_str(&place);
        }
        if let Some(phone) = &self.address.phone {
            line.push_str(" - ");
            line.push_str(phone);
        }
        line
    }
}

impl TextFormat for SearchDoctorsOutput {
    fn fmt_text(&self, opts: &TextOptions) -> String {
        let mut out = format!("Found {} doctors.", self.results.len());
        let shown = opts.max_items.unwrap_or(usize::MAX);
        let bullet = if opts.markdown { "* " } else { "- " };
        for doc in self.results.iter().take(shown) {
            out.push('\n');
            out.push_str(bullet);
            out.push_str(&doc.summary_line());
        }
        if self.results.len() > shown {
            out.push_str(&format!("\n... and {} more", self.results.len() - shown));
        }
        out
    }
}

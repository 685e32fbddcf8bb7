//! Raw response types for the registry search endpoint.
//!
//! Every field is optional: the registry omits keys freely and mixes
//! individual (NPI-1) and organization (NPI-2) records in one result set.

use serde::{Deserialize, Serialize};

/// `address_purpose` value marking a practice location
pub const LOCATION_PURPOSE: &str = "LOCATION";

/// Top-level response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryResponse {
    /// Number of results the registry reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
    /// Matching provider records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RegistryItem>>,
    /// Validation errors; present instead of `results` when a query is rejected
    #[serde(rename = "Errors", default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RegistryErrorEntry>>,
}

impl RegistryResponse {
    /// Returns the result items, treating an absent array as empty
    #[must_use]
    pub fn items(&self) -> &[RegistryItem] {
        self.results.as_deref().unwrap_or_default()
    }

    /// Returns registry validation errors, if any were reported
    #[must_use]
    pub fn registry_errors(&self) -> Option<&[RegistryErrorEntry]> {
        self.errors.as_deref().filter(|errs| !errs.is_empty())
    }
}

/// One provider record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryItem {
    /// The provider's NPI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NpiNumber>,
    /// `NPI-1` (individual) or `NPI-2` (organization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumeration_type: Option<String>,
    /// Name, credential and demographic data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<Basic>,
    /// Mailing and practice-location addresses, in registry order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
    /// Taxonomy (specialty) entries, in registry order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomies: Option<Vec<Taxonomy>>,
}

impl RegistryItem {
    /// Returns the address entries, treating an absent array as empty
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        self.addresses.as_deref().unwrap_or_default()
    }

    /// Returns the taxonomy entries, treating an absent array as empty
    #[must_use]
    pub fn taxonomies(&self) -> &[Taxonomy] {
        self.taxonomies.as_deref().unwrap_or_default()
    }
}

/// A provider's NPI as it appears on the wire
///
/// The registry sends a JSON number; some mirrors send a string. Both are
/// passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum NpiNumber {
    /// Numeric form
    Number(u64),
    /// String form
    Text(String),
}

impl std::fmt::Display for NpiNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The `basic` block of a provider record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Basic {
    /// First name (individuals)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name (individuals)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Middle name (individuals)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Credential text, e.g. "MD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// Gender code, e.g. "F"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Organization name (organizations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// Enumeration status, e.g. "A"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// An address entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    /// `LOCATION` or `MAILING`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_purpose: Option<String>,
    /// First street line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_1: Option<String>,
    /// Second street line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Telephone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone_number: Option<String>,
    /// Fax number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,
}

impl Address {
    /// Whether this entry is a practice location
    #[must_use]
    pub fn is_practice_location(&self) -> bool {
        self.address_purpose.as_deref() == Some(LOCATION_PURPOSE)
    }
}

/// A taxonomy (specialty) entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Taxonomy code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Taxonomy description, e.g. "Family Medicine"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Whether this is the provider's primary taxonomy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// License state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// License number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Taxonomy {
    /// Whether this entry is flagged primary
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary == Some(true)
    }
}

/// One entry of the registry's `Errors` array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryErrorEntry {
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Offending query field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Registry error number (sent as a string or number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tolerates_sparse_items() {
        let body = json!({
            "result_count": 2,
            "results": [
                { "number": 1234567893_u64 },
                { "number": "1987654321", "basic": { "organization_name": "CLINIC" }, "addresses": null }
            ]
        });
        let resp: RegistryResponse = serde_json::from_value(body).unwrap();
        let items = resp.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].number, Some(NpiNumber::Number(1_234_567_893)));
        assert_eq!(
            items[1].number,
            Some(NpiNumber::Text("1987654321".to_string()))
        );
        assert!(items[0].addresses().is_empty());
        assert!(items[1].taxonomies().is_empty());
    }

    #[test]
    fn absent_results_are_empty() {
        let resp: RegistryResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.items().is_empty());
        assert!(resp.registry_errors().is_none());
    }

    #[test]
    fn parses_registry_errors() {
        let resp: RegistryResponse = serde_json::from_value(json!({
            "Errors": [{ "description": "No valid search criteria provided", "field": "generic", "number": "04" }]
        }))
        .unwrap();
        let errs = resp.registry_errors().unwrap();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field.as_deref(), Some("generic"));
    }

    #[test]
    fn empty_errors_array_is_ignored() {
        let resp: RegistryResponse =
            serde_json::from_value(json!({ "Errors": [], "results": [] })).unwrap();
        assert!(resp.registry_errors().is_none());
    }

    #[test]
    fn npi_display_matches_wire_text() {
        assert_eq!(NpiNumber::Number(1_003_000_126).to_string(), "1003000126");
        assert_eq!(NpiNumber::Text("1003000126".into()).to_string(), "1003000126");
    }

    #[test]
    fn purpose_and_primary_flags() {
        let addr = Address {
            address_purpose: Some("LOCATION".into()),
            ..Address::default()
        };
        assert!(addr.is_practice_location());
        assert!(!Address::default().is_practice_location());

        let tax = Taxonomy {
            primary: Some(true),
            ..Taxonomy::default()
        };
        assert!(tax.is_primary());
        assert!(!Taxonomy::default().is_primary());
    }
}

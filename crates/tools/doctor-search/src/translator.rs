//! Request to registry query, and registry response to doctor records.

use nppes_async::Client;
use nppes_async::config::Config;
use nppes_async::types::{RegistryItem, RegistryQuery, RegistryResponse};

use crate::error::SearchError;
use crate::types::{DoctorRecord, ErrorResult, PracticeAddress, SearchOutcome, SearchRequest};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builds the registry query for `req`.
///
/// Blank fields are skipped and the rest are trimmed. A first name also turns
/// on alias matching for first names.
///
/// # Errors
///
/// Returns [`SearchError::MissingCriteria`] when no criterion is non-empty.
pub fn build_query(req: &SearchRequest) -> Result<RegistryQuery, SearchError> {
    let mut query = RegistryQuery::new().with_limit(req.limit);
    if let Some(v) = non_empty(req.first_name.as_deref()) {
        query = query.with_first_name(v).with_first_name_alias(true);
    }
    if let Some(v) = non_empty(req.last_name.as_deref()) {
        query = query.with_last_name(v);
    }
    if let Some(v) = non_empty(req.city.as_deref()) {
        query = query.with_city(v);
    }
    if let Some(v) = non_empty(req.state.as_deref()) {
        query = query.with_state(v);
    }
    if let Some(v) = non_empty(req.specialty.as_deref()) {
        query = query.with_taxonomy_description(v);
    }

    if !query.has_criteria() {
        return Err(SearchError::MissingCriteria);
    }
    Ok(query)
}

/// Flattens one registry record.
///
/// The specialty comes from the first taxonomy flagged primary and the
/// address from the first `LOCATION` entry.
#[must_use]
pub fn flatten_item(item: &RegistryItem) -> DoctorRecord {
    let basic = item.basic.as_ref();
    let first = basic.and_then(|b| b.first_name.as_deref()).unwrap_or("");
    let last = basic.and_then(|b| b.last_name.as_deref()).unwrap_or("");

    let specialty = item
        .taxonomies()
        .iter()
        .find(|t| t.is_primary())
        .and_then(|t| t.desc.clone());

    let address = item
        .addresses()
        .iter()
        .find(|a| a.is_practice_location())
        .map(|a| PracticeAddress {
            address_1: a.address_1.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            postal_code: a.postal_code.clone(),
            phone: a.telephone_number.clone(),
        })
        .unwrap_or_default();

    DoctorRecord {
        name: format!("{first} {last}").trim().to_string(),
        npi: item.number.clone(),
        credential: basic.and_then(|b| b.credential.clone()),
        gender: basic.and_then(|b| b.gender.clone()),
        specialty,
        address,
    }
}

/// Flattens every record of a response, in registry order.
#[must_use]
pub fn flatten_response(resp: &RegistryResponse) -> Vec<DoctorRecord> {
    resp.items().iter().map(flatten_item).collect()
}

/// Runs one lookup and returns the flattened records.
///
/// # Errors
///
/// Returns [`SearchError::MissingCriteria`] without touching the network when
/// the request is empty, otherwise the classified client failure.
pub async fn try_search<C: Config>(
    client: &Client<C>,
    req: &SearchRequest,
) -> Result<Vec<DoctorRecord>, SearchError> {
    let query = build_query(req)?;
    let resp = client.search().create(&query).await?;
    let records = flatten_response(&resp);
    tracing::info!(
        limit = query.limit(),
        results = records.len(),
        "doctor search completed"
    );
    Ok(records)
}

/// Runs one lookup, folding every failure into an [`ErrorResult`].
pub async fn search<C: Config>(client: &Client<C>, req: &SearchRequest) -> SearchOutcome {
    match try_search(client, req).await {
        Ok(records) => SearchOutcome::Results(records),
        Err(e) => {
            tracing::warn!(error = %e, "doctor search failed");
            SearchOutcome::Error(ErrorResult::from(&e))
        }
    }
}

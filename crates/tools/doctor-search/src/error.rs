use nppes_async::NppesError;
use thiserror::Error;

/// Text returned when a request names no search criterion.
pub const MISSING_CRITERIA_MESSAGE: &str = "Please provide at least one search criterion.";

/// Failure of a doctor lookup
#[derive(Debug, Error)]
pub enum SearchError {
    /// Every criterion was empty; no request was sent.
    #[error("{}", MISSING_CRITERIA_MESSAGE)]
    MissingCriteria,

    /// Connect failure, timeout, non-2xx status, or a query the registry rejected.
    #[error("Registry request failed: {0}")]
    Transport(NppesError),

    /// The registry answered with a body that is not the expected JSON.
    #[error("Could not parse registry response: {0}")]
    Parse(NppesError),
}

impl From<NppesError> for SearchError {
    fn from(e: NppesError) -> Self {
        match e {
            NppesError::Serde(_) => Self::Parse(e),
            other => Self::Transport(other),
        }
    }
}

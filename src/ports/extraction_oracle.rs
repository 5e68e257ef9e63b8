//! Extraction Oracle Port - Interface for structured extraction backends.
//!
//! The oracle is treated as an unreliable black box: given free text it
//! returns a best-effort blob that should contain one JSON object in the
//! order-intent shape, but may contain anything or nothing. The pipeline
//! depends only on this capability, never on a specific backend, so the
//! generative, keyword-rule, and scripted variants are interchangeable.

use async_trait::async_trait;

/// Port for best-effort structured extraction from chat text.
#[async_trait]
pub trait ExtractionOracle: Send + Sync {
    /// Extracts a raw structured blob from the user's text.
    ///
    /// The returned string is not guaranteed to be valid JSON; callers must
    /// run it through `normalize`. Backends that find nothing should return
    /// an empty object rather than an error, reserving errors for transport
    /// and backend faults.
    async fn extract(&self, text: &str) -> Result<String, OracleError>;

    /// Name of the backend, for logging.
    fn backend_name(&self) -> &'static str;
}

/// Extraction backend errors.
///
/// None of these is fatal to a conversation; the handler folds every oracle
/// error into the incomplete-data path.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Backend unreachable or request failed in transit.
    #[error("oracle unreachable: {0}")]
    Unreachable(String),

    /// Backend answered with a non-success status.
    #[error("oracle rejected request: status {status}")]
    Rejected {
        /// HTTP status returned by the backend.
        status: u16,
    },

    /// Backend response body could not be decoded.
    #[error("oracle response unreadable: {0}")]
    Unreadable(String),
}

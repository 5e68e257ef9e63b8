//! ERP Ports - master-data lookups and order submission.
//!
//! Two narrow contracts over the ERP: `CatalogReader` for read-only
//! exact-match lookups and `OrderGateway` for the one write the pipeline
//! performs. The Service Layer client implements both; tests substitute
//! in-memory fakes.

use async_trait::async_trait;

use crate::domain::order::{OrderConfirmation, ResolvedOrderPayload};

/// Port for read-only master-data queries.
///
/// Every method distinguishes "no such record" (`Ok(None)`) from a failed
/// query (`Err`). Lookups are exact-match only; no fuzzy matching is offered.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Finds a customer card code by exact email match.
    async fn customer_by_email(&self, email: &str) -> Result<Option<String>, ErpError>;

    /// Finds a customer card code by exact name match.
    async fn customer_by_name(&self, name: &str) -> Result<Option<String>, ErpError>;

    /// Finds an item code by exact item-name match.
    async fn item_by_name(&self, name: &str) -> Result<Option<String>, ErpError>;
}

/// Port for sales-order submission.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits a resolved order.
    ///
    /// Business-level rejection by the ERP is data (`OrderOutcome::Rejected`),
    /// not an error; `Err` is reserved for transport and session failures.
    /// No idempotency key is attached: a retry after a transient failure
    /// during submission can create a duplicate order.
    async fn place_order(&self, payload: &ResolvedOrderPayload) -> Result<OrderOutcome, ErpError>;
}

/// Result of an order submission that reached the ERP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The ERP reported the creation status.
    Created(OrderConfirmation),
    /// The ERP answered, but refused the document.
    Rejected {
        /// ERP-reported reason, for logs; never shown verbatim to users.
        message: String,
    },
}

/// ERP client errors.
#[derive(Debug, thiserror::Error)]
pub enum ErpError {
    /// Login itself failed. Terminal: operations fail fast, no login loop.
    #[error("service layer login failed: {message}")]
    LoginFailed {
        /// Transport or credential failure detail.
        message: String,
    },

    /// The session expired and the single re-login retry also failed.
    #[error("session expired and could not be renewed")]
    SessionNotRenewable,

    /// Network failure or timeout talking to the ERP.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Response carried a status the call cannot interpret.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logs.
        body: String,
    },

    /// Response body could not be decoded.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl ErpError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True when the failure happened at login time.
    pub fn is_login_failure(&self) -> bool {
        matches!(self, ErpError::LoginFailed { .. })
    }
}

//! Entity resolution against ERP master data.
//!
//! Human-readable references from the extraction step become canonical keys
//! here. Customer identifiers are tried in a fixed priority order; items are
//! exact-name matches only. Resolution is atomic: if any line's item cannot
//! be resolved, the whole order fails and nothing partial is ever submitted.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::config::{OrderConfig, UnresolvedCustomerAction, ValidationError};
use crate::domain::order::{CustomerReference, OrderIntentRecord, ResolvedOrderPayload};
use crate::ports::{CatalogReader, ErpError};

/// What to do when no customer identifier resolves.
///
/// An explicit configuration choice, never a silent fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedCustomerPolicy {
    /// Fail the whole request.
    Fail,
    /// Substitute this card code.
    UseDefault(String),
}

impl UnresolvedCustomerPolicy {
    /// Builds the policy from validated order configuration.
    pub fn from_config(config: &OrderConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(match config.on_unresolved_customer {
            UnresolvedCustomerAction::Fail => Self::Fail,
            UnresolvedCustomerAction::UseDefault => {
                Self::UseDefault(config.default_card_code.clone().unwrap_or_default())
            }
        })
    }
}

/// Resolution failures.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No customer identifier resolved under the `Fail` policy.
    #[error("no customer found")]
    CustomerNotFound,

    /// A line's item has no exact catalog match. Fails the whole order.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// A catalog query itself failed.
    #[error(transparent)]
    Erp(#[from] ErpError),
}

/// Resolves order-intent references to ERP keys.
pub struct EntityResolver {
    catalog: Arc<dyn CatalogReader>,
    policy: UnresolvedCustomerPolicy,
}

impl EntityResolver {
    /// Creates a resolver over a catalog with the given customer policy.
    pub fn new(catalog: Arc<dyn CatalogReader>, policy: UnresolvedCustomerPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Resolves a customer reference to a card code.
    ///
    /// Priority: explicit code (verbatim, unvalidated), then email exact
    /// match, then name exact match. The first identifier that yields a hit
    /// wins and nothing further is tried. When nothing resolves, the
    /// configured policy decides between failure and the default card code.
    pub async fn resolve_customer(
        &self,
        customer: &CustomerReference,
    ) -> Result<String, ResolveError> {
        if let Some(code) = &customer.explicit_code {
            debug!(card_code = %code, "using explicit customer code");
            return Ok(code.clone());
        }

        if let Some(email) = &customer.email {
            if let Some(code) = self.catalog.customer_by_email(email).await? {
                return Ok(code);
            }
        }

        if let Some(name) = &customer.name {
            if let Some(code) = self.catalog.customer_by_name(name).await? {
                return Ok(code);
            }
        }

        match &self.policy {
            UnresolvedCustomerPolicy::UseDefault(code) => {
                debug!(card_code = %code, "substituting configured default customer");
                Ok(code.clone())
            }
            UnresolvedCustomerPolicy::Fail => Err(ResolveError::CustomerNotFound),
        }
    }

    /// Resolves a whole intent into a submittable payload.
    ///
    /// Every line's item is resolved before any payload exists; the first
    /// unresolved item aborts with [`ResolveError::ItemNotFound`] naming it.
    pub async fn resolve(
        &self,
        intent: &OrderIntentRecord,
    ) -> Result<ResolvedOrderPayload, ResolveError> {
        let card_code = self.resolve_customer(&intent.customer).await?;

        let mut item_codes = Vec::with_capacity(intent.lines.len());
        for line in &intent.lines {
            match self.catalog.item_by_name(&line.item_ref).await? {
                Some(code) => item_codes.push(code),
                None => return Err(ResolveError::ItemNotFound(line.item_ref.clone())),
            }
        }

        Ok(ResolvedOrderPayload::from_resolved(intent, card_code, item_codes))
    }
}

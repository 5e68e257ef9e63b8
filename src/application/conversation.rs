//! Conversation Handler - one request/response cycle.
//!
//! The single operation the front end calls: `respond(text) -> text`.
//! Detects the reply language once, runs extraction, normalization,
//! resolution, and submission in sequence with each step gating the next,
//! and renders every outcome — including internal faults — as localized
//! text from the fixed template set. No structured error ever escapes.

use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

use super::resolver::{EntityResolver, ResolveError, UnresolvedCustomerPolicy};
use crate::domain::language::Language;
use crate::domain::order::{normalize, NormalizedIntent};
use crate::domain::reply;
use crate::ports::{CatalogReader, ExtractionOracle, OrderGateway, OrderOutcome};

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One display-only transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Orchestrates one chat turn into at most one placed order.
pub struct ConversationHandler {
    oracle: Arc<dyn ExtractionOracle>,
    resolver: EntityResolver,
    orders: Arc<dyn OrderGateway>,
    /// Append-only, display-only; never feeds back into extraction.
    transcript: Mutex<Vec<TranscriptEntry>>,
}

impl ConversationHandler {
    /// Creates a handler over the given collaborators.
    pub fn new(
        oracle: Arc<dyn ExtractionOracle>,
        catalog: Arc<dyn CatalogReader>,
        orders: Arc<dyn OrderGateway>,
        policy: UnresolvedCustomerPolicy,
    ) -> Self {
        Self {
            oracle,
            resolver: EntityResolver::new(catalog, policy),
            orders,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Answers one chat message.
    ///
    /// Always returns user-facing text in the language detected from the
    /// input; faults at any step collapse into the localized templates.
    pub async fn respond(&self, text: &str) -> String {
        let lang = Language::detect(text);
        let answer = self.respond_in(text, lang).await;

        info!(user_input = %text, bot_response = %answer, "conversation turn");
        self.append(Speaker::User, text);
        self.append(Speaker::Bot, &answer);

        answer
    }

    async fn respond_in(&self, text: &str, lang: Language) -> String {
        // Extraction failure is never fatal; it reads as incomplete input.
        let blob = match self.oracle.extract(text).await {
            Ok(blob) => blob,
            Err(err) => {
                warn!(backend = self.oracle.backend_name(), error = %err,
                    "extraction oracle failed");
                return reply::incomplete(lang);
            }
        };

        let record = match normalize(&blob) {
            NormalizedIntent::Actionable(record) => record,
            NormalizedIntent::Incomplete => return reply::incomplete(lang),
        };

        let payload = match self.resolver.resolve(&record).await {
            Ok(payload) => payload,
            Err(ResolveError::ItemNotFound(item)) => {
                return reply::item_not_found(lang, &item);
            }
            Err(ResolveError::CustomerNotFound) => {
                return reply::customer_not_found(lang);
            }
            Err(ResolveError::Erp(err)) => {
                error!(error = %err, "catalog lookup failed");
                return reply::try_again(lang);
            }
        };

        match self.orders.place_order(&payload).await {
            Ok(OrderOutcome::Created(_)) => reply::order_placed(lang, &payload.summary()),
            Ok(OrderOutcome::Rejected { message }) => {
                warn!(reason = %message, "order rejected by the erp");
                reply::try_again(lang)
            }
            Err(err) => {
                error!(error = %err, "order submission failed");
                reply::try_again(lang)
            }
        }
    }

    fn append(&self, speaker: Speaker, text: &str) {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner()).push(TranscriptEntry {
            speaker,
            text: text.to_string(),
        });
    }

    /// Snapshot of the display transcript.
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

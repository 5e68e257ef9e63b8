//! Application layer - request orchestration.
//!
//! `resolver` turns an order intent into a submittable payload by resolving
//! references against the catalog; `conversation` runs one full
//! request/response cycle and renders every outcome as localized text.

mod conversation;
mod resolver;

pub use conversation::{ConversationHandler, Speaker, TranscriptEntry};
pub use resolver::{EntityResolver, ResolveError, UnresolvedCustomerPolicy};

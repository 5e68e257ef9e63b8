//! Order intent and payload types.
//!
//! `intent` holds what the oracle claimed the user wants, `normalize` turns a
//! raw oracle blob into that shape (or an explicit incomplete marker), and
//! `payload` is the resolved, submittable Service Layer document.

mod intent;
mod normalize;
mod payload;

pub use intent::{CustomerReference, IntentLine, OrderIntentRecord};
pub use normalize::{normalize, NormalizedIntent};
pub use payload::{DocumentLine, OrderConfirmation, ResolvedOrderPayload};

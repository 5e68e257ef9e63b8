//! Order intent as extracted from free text.

use chrono::NaiveDate;

/// How the user identified the customer, before resolution.
///
/// All fields are opaque strings from the extraction step. Resolution tries
/// them in a fixed priority order: explicit code, then email, then name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerReference {
    /// ERP card code given verbatim in the request (used unvalidated).
    pub explicit_code: Option<String>,
    /// Customer email for an exact-match lookup.
    pub email: Option<String>,
    /// Customer name for an exact-match lookup.
    pub name: Option<String>,
}

impl CustomerReference {
    /// Returns true if no identifier is present at all.
    pub fn is_empty(&self) -> bool {
        self.explicit_code.is_none() && self.email.is_none() && self.name.is_none()
    }
}

/// One requested line: an item reference and a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentLine {
    /// Human-readable item reference, resolved by exact catalog name match.
    pub item_ref: String,
    /// Requested quantity; normalization guarantees this is positive.
    pub quantity: u32,
}

/// A complete, actionable order intent.
///
/// Invariant: `lines` is non-empty and both dates are present. Records that
/// cannot satisfy this are represented as incomplete and never constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntentRecord {
    pub customer: CustomerReference,
    pub lines: Vec<IntentLine>,
    pub doc_date: NaiveDate,
    pub doc_due_date: NaiveDate,
}

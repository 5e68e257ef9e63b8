//! Resolved order payload in Service Layer wire shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::intent::OrderIntentRecord;

/// One submittable document line. Every item code came from a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    #[serde(rename = "ItemCode")]
    pub item_code: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

/// A fully resolved sales order, ready for `POST /Orders`.
///
/// Constructed only by the resolver, and only atomically: if any line's item
/// cannot be resolved, no payload exists. Serializes directly into the
/// Service Layer's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOrderPayload {
    #[serde(rename = "CardCode")]
    pub card_code: String,
    #[serde(rename = "DocDate")]
    pub doc_date: NaiveDate,
    #[serde(rename = "DocDueDate")]
    pub doc_due_date: NaiveDate,
    #[serde(rename = "DocumentLines")]
    pub document_lines: Vec<DocumentLine>,
}

impl ResolvedOrderPayload {
    /// Builds a payload from an intent plus the resolved keys.
    ///
    /// `item_codes` must be parallel to `intent.lines`; the resolver upholds
    /// this by resolving every line before constructing anything.
    pub fn from_resolved(
        intent: &OrderIntentRecord,
        card_code: String,
        item_codes: Vec<String>,
    ) -> Self {
        debug_assert_eq!(intent.lines.len(), item_codes.len());
        let document_lines = intent
            .lines
            .iter()
            .zip(item_codes)
            .map(|(line, item_code)| DocumentLine {
                item_code,
                quantity: line.quantity,
            })
            .collect();
        Self {
            card_code,
            doc_date: intent.doc_date,
            doc_due_date: intent.doc_due_date,
            document_lines,
        }
    }

    /// Human-readable quantity/item summary, e.g. `5 units of T001`.
    pub fn summary(&self) -> String {
        self.document_lines
            .iter()
            .map(|line| format!("{} units of {}", line.quantity, line.item_code))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Confirmation data returned by the ERP on order creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderConfirmation {
    /// Internal document entry key.
    #[serde(rename = "DocEntry")]
    pub doc_entry: Option<i64>,
    /// User-visible document number.
    #[serde(rename = "DocNum")]
    pub doc_num: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{CustomerReference, IntentLine};

    fn intent() -> OrderIntentRecord {
        OrderIntentRecord {
            customer: CustomerReference::default(),
            lines: vec![
                IntentLine { item_ref: "Test Item".into(), quantity: 5 },
                IntentLine { item_ref: "Other".into(), quantity: 2 },
            ],
            doc_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            doc_due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn serializes_service_layer_field_names() {
        let payload = ResolvedOrderPayload::from_resolved(
            &intent(),
            "C100".into(),
            vec!["T001".into(), "T002".into()],
        );
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["CardCode"], "C100");
        assert_eq!(json["DocDate"], "2024-01-01");
        assert_eq!(json["DocDueDate"], "2024-01-01");
        assert_eq!(json["DocumentLines"][0]["ItemCode"], "T001");
        assert_eq!(json["DocumentLines"][0]["Quantity"], 5);
    }

    #[test]
    fn summary_joins_lines() {
        let payload = ResolvedOrderPayload::from_resolved(
            &intent(),
            "C100".into(),
            vec!["T001".into(), "T002".into()],
        );
        assert_eq!(payload.summary(), "5 units of T001, 2 units of T002");
    }

    #[test]
    fn confirmation_parses_creation_body() {
        let body = r#"{"DocEntry": 42, "DocNum": 1001, "CardCode": "C100"}"#;
        let confirmation: OrderConfirmation = serde_json::from_str(body).unwrap();
        assert_eq!(confirmation.doc_entry, Some(42));
        assert_eq!(confirmation.doc_num, Some(1001));
    }
}

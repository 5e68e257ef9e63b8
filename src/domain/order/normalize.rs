//! Normalization of raw oracle output into an order intent.
//!
//! The oracle is an unreliable collaborator: it may return prose around the
//! JSON, malformed JSON, or nothing usable at all. `normalize` is a total
//! function over that blob. It never errors or panics; every failure mode
//! collapses into [`NormalizedIntent::Incomplete`], so downstream code only
//! ever branches on completeness.

use chrono::NaiveDate;
use serde_json::Value;

use super::intent::{CustomerReference, IntentLine, OrderIntentRecord};

/// Result of normalizing raw oracle output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedIntent {
    /// Lines are non-empty and both dates are present; safe to resolve.
    Actionable(OrderIntentRecord),
    /// Required fields could not be extracted. Terminal for the request.
    Incomplete,
}

impl NormalizedIntent {
    /// Returns the record if the intent is actionable.
    pub fn into_record(self) -> Option<OrderIntentRecord> {
        match self {
            NormalizedIntent::Actionable(record) => Some(record),
            NormalizedIntent::Incomplete => None,
        }
    }
}

/// Normalizes whatever text the oracle emitted.
///
/// Locates the span from the first `{` to the last `}` and parses it as JSON
/// with the keys `Email`, `CustomerName`, `CardCode`, `DocDate`,
/// `DocDueDate`, and `DocumentLines[{ItemName|ItemCode, Quantity}]`.
///
/// Field rules:
/// - quantities must be positive integers; offending lines are dropped, not
///   clamped
/// - item and customer references must be non-empty after trimming
///   surrounding quotes and whitespace
/// - missing identity fields default to empty
pub fn normalize(raw: &str) -> NormalizedIntent {
    let value = match extract_json_object(raw) {
        Some(value) => value,
        None => return NormalizedIntent::Incomplete,
    };

    let customer = CustomerReference {
        explicit_code: string_field(&value, "CardCode"),
        email: string_field(&value, "Email"),
        name: string_field(&value, "CustomerName"),
    };

    let lines: Vec<IntentLine> = value
        .get("DocumentLines")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_line).collect())
        .unwrap_or_default();

    // DocumentDate is the legacy spelling still produced by some prompts.
    let doc_date = date_field(&value, "DocDate").or_else(|| date_field(&value, "DocumentDate"));
    let doc_due_date = date_field(&value, "DocDueDate");

    match (doc_date, doc_due_date) {
        (Some(doc_date), Some(doc_due_date)) if !lines.is_empty() => {
            NormalizedIntent::Actionable(OrderIntentRecord {
                customer,
                lines,
                doc_date,
                doc_due_date,
            })
        }
        _ => NormalizedIntent::Incomplete,
    }
}

/// Extracts and parses the span from the first `{` to the last `}`.
fn extract_json_object(raw: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    let parsed: Value = serde_json::from_str(&raw[start..=end]).ok()?;
    parsed.is_object().then_some(parsed)
}

/// Reads a string field, trimmed; empty or non-string becomes `None`.
fn string_field(value: &Value, key: &str) -> Option<String> {
    let trimmed = trim_reference(value.get(key)?.as_str()?);
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Reads an ISO calendar date, tolerating a trailing time component.
fn date_field(value: &Value, key: &str) -> Option<NaiveDate> {
    let raw = value.get(key)?.as_str()?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parses one document line; invalid quantity or empty reference drops it.
fn parse_line(entry: &Value) -> Option<IntentLine> {
    let quantity = entry.get("Quantity")?.as_i64()?;
    let quantity = u32::try_from(quantity).ok().filter(|q| *q > 0)?;

    let item_ref = entry
        .get("ItemName")
        .or_else(|| entry.get("ItemCode"))
        .and_then(Value::as_str)
        .map(trim_reference)?;
    if item_ref.is_empty() {
        return None;
    }

    Some(IntentLine {
        item_ref: item_ref.to_string(),
        quantity,
    })
}

/// Strips whitespace and surrounding straight or curly quotes.
fn trim_reference(s: &str) -> &str {
    s.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}'))
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actionable(raw: &str) -> OrderIntentRecord {
        normalize(raw).into_record().expect("expected actionable intent")
    }

    #[test]
    fn normalizes_full_record() {
        let raw = r#"{"Email": "test@example.com", "DocDate": "2024-01-01",
            "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemName": "Test Item", "Quantity": 5}]}"#;

        let record = actionable(raw);
        assert_eq!(record.customer.email.as_deref(), Some("test@example.com"));
        assert_eq!(record.lines.len(), 1);
        assert_eq!(record.lines[0].item_ref, "Test Item");
        assert_eq!(record.lines[0].quantity, 5);
        assert_eq!(record.doc_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn extracts_json_embedded_in_prose() {
        let raw = r#"Sure! Here is the order:
            {"DocDate": "2024-02-01", "DocDueDate": "2024-03-01",
             "DocumentLines": [{"ItemName": "Item1", "Quantity": 2}]}
            Anything else?"#;
        assert!(matches!(normalize(raw), NormalizedIntent::Actionable(_)));
    }

    #[test]
    fn empty_output_is_incomplete() {
        assert_eq!(normalize(""), NormalizedIntent::Incomplete);
        assert_eq!(normalize("{}"), NormalizedIntent::Incomplete);
    }

    #[test]
    fn malformed_json_is_incomplete_not_an_error() {
        assert_eq!(normalize("{not json"), NormalizedIntent::Incomplete);
        assert_eq!(normalize("}{"), NormalizedIntent::Incomplete);
        assert_eq!(normalize("no braces at all"), NormalizedIntent::Incomplete);
    }

    #[test]
    fn missing_dates_are_incomplete() {
        let raw = r#"{"DocumentLines": [{"ItemName": "Item1", "Quantity": 2}]}"#;
        assert_eq!(normalize(raw), NormalizedIntent::Incomplete);
    }

    #[test]
    fn zero_lines_after_filtering_is_incomplete() {
        let raw = r#"{"DocDate": "2024-01-01", "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemName": "Item1", "Quantity": 0},
                              {"ItemName": "Item2", "Quantity": -3}]}"#;
        assert_eq!(normalize(raw), NormalizedIntent::Incomplete);
    }

    #[test]
    fn fractional_quantity_is_dropped_not_clamped() {
        let raw = r#"{"DocDate": "2024-01-01", "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemName": "Item1", "Quantity": 2.5},
                              {"ItemName": "Item2", "Quantity": 3}]}"#;
        let record = actionable(raw);
        assert_eq!(record.lines.len(), 1);
        assert_eq!(record.lines[0].item_ref, "Item2");
    }

    #[test]
    fn blank_item_reference_drops_the_line() {
        let raw = r#"{"DocDate": "2024-01-01", "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemName": "  \"\"  ", "Quantity": 1},
                              {"ItemName": "Item2", "Quantity": 1}]}"#;
        let record = actionable(raw);
        assert_eq!(record.lines.len(), 1);
    }

    #[test]
    fn item_code_is_accepted_as_reference() {
        let raw = r#"{"DocDate": "2024-01-01", "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemCode": "T001", "Quantity": 4}]}"#;
        let record = actionable(raw);
        assert_eq!(record.lines[0].item_ref, "T001");
    }

    #[test]
    fn references_are_trimmed_of_quotes() {
        let raw = r#"{"CustomerName": " 'Acme Inc' ", "DocDate": "2024-01-01",
            "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemName": "\"Test Item\"", "Quantity": 1}]}"#;
        let record = actionable(raw);
        assert_eq!(record.customer.name.as_deref(), Some("Acme Inc"));
        assert_eq!(record.lines[0].item_ref, "Test Item");
    }

    #[test]
    fn timestamped_dates_are_accepted() {
        let raw = r#"{"DocDate": "2025-05-05T00:00:00.0000000+03:00",
            "DocDueDate": "2025-06-04T00:00:00.0000000+03:00",
            "DocumentLines": [{"ItemName": "Item1", "Quantity": 1}]}"#;
        let record = actionable(raw);
        assert_eq!(record.doc_date, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
    }

    #[test]
    fn legacy_document_date_key_is_accepted() {
        let raw = r#"{"DocumentDate": "2024-01-01", "DocDueDate": "2024-01-02",
            "DocumentLines": [{"ItemName": "Item1", "Quantity": 1}]}"#;
        assert!(matches!(normalize(raw), NormalizedIntent::Actionable(_)));
    }

    #[test]
    fn empty_identity_fields_default_to_none() {
        let raw = r#"{"Email": "", "CardCode": "  ", "DocDate": "2024-01-01",
            "DocDueDate": "2024-01-01",
            "DocumentLines": [{"ItemName": "Item1", "Quantity": 1}]}"#;
        let record = actionable(raw);
        assert!(record.customer.is_empty());
    }

    #[test]
    fn top_level_array_is_incomplete() {
        assert_eq!(
            normalize(r#"[{"ItemName": "Item1", "Quantity": 1}]"#),
            NormalizedIntent::Incomplete
        );
    }

    proptest! {
        /// `normalize` is total: arbitrary input never panics.
        #[test]
        fn never_panics_on_arbitrary_input(raw in ".{0,400}") {
            let _ = normalize(&raw);
        }

        /// Arbitrary brace-wrapped garbage is incomplete, never a panic.
        #[test]
        fn garbage_objects_are_incomplete(inner in "[a-z0-9:, ]{0,80}") {
            let raw = format!("{{{inner}}}");
            let _ = normalize(&raw);
        }
    }
}

//! Keyword Oracle - rule-based extraction without a model.
//!
//! Recognizes common order phrasing in English and Arabic ("Order 20 units of
//! X", "اطلب 50 كيس من X", "I need 10 X urgently") plus an email address, and
//! emits the same JSON shape the generative backend produces so the
//! normalization step treats both identically. Anything it cannot read comes
//! back as an empty object, never an error.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::ports::{ExtractionOracle, OracleError};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Quantity followed by an optional unit word and the item text, in either
/// language. Arabic-Indic digits are accepted alongside ASCII digits.
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)([0-9\x{0660}-\x{0669}]+)\s*(?:units?|bottles?|bags?|pieces?|boxes?|وحدة|وحدات|كيس|أكياس|قطعة|قطع|شكاير)?\s*(?:of|من)?\s+(.+)",
    )
    .unwrap()
});

/// Trailing filler words that are not part of the product name.
const TRAILING_FILLER: &[&str] = &["urgently", "please", "now", "asap", "بسرعة", "فورا", "فوراً", "رجاء"];

/// Trailing connectors left over once the email is cut out of the text.
const TRAILING_CONNECTORS: &[&str] = &["for", "to", "لـ", "إلى", "الى"];

/// Rule-based extraction oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOracle;

impl KeywordOracle {
    /// Creates a new keyword oracle.
    pub fn new() -> Self {
        Self
    }

    fn extract_blob(&self, text: &str, today: NaiveDate) -> String {
        let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());

        // Cut the email out so it cannot bleed into the item name.
        let remainder = match &email {
            Some(found) => text.replacen(found.as_str(), "", 1),
            None => text.to_string(),
        };

        let line = parse_line(&remainder);

        let (item, quantity) = match line {
            Some(parsed) => parsed,
            None => return "{}".to_string(),
        };

        let due = today + ChronoDuration::days(30);
        let mut blob = json!({
            "DocDate": today.to_string(),
            "DocDueDate": due.to_string(),
            "DocumentLines": [{"ItemName": item, "Quantity": quantity}],
        });
        if let Some(email) = email {
            blob["Email"] = json!(email);
        }
        blob.to_string()
    }
}

#[async_trait]
impl ExtractionOracle for KeywordOracle {
    async fn extract(&self, text: &str) -> Result<String, OracleError> {
        Ok(self.extract_blob(text, Utc::now().date_naive()))
    }

    fn backend_name(&self) -> &'static str {
        "keyword"
    }
}

/// Finds the first quantity/item pair in the text.
fn parse_line(text: &str) -> Option<(String, u32)> {
    let captures = LINE_RE.captures(text)?;
    let quantity = parse_quantity(captures.get(1)?.as_str())?;
    let item = clean_item(captures.get(2)?.as_str());
    (!item.is_empty()).then_some((item, quantity))
}

/// Parses a quantity, converting Arabic-Indic digits to ASCII first.
fn parse_quantity(raw: &str) -> Option<u32> {
    let ascii: String = raw
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => {
                char::from_digit(c as u32 - 0x0660, 10).unwrap_or(c)
            }
            _ => c,
        })
        .collect();
    ascii.parse().ok().filter(|q| *q > 0)
}

/// Strips punctuation, filler words, and dangling connectors off the tail.
fn clean_item(raw: &str) -> String {
    let mut words: Vec<&str> = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '.' | '!' | '?' | '؟' | '،' | ','))
        .split_whitespace()
        .collect();

    while let Some(last) = words.last() {
        let lowered = last.to_lowercase();
        if TRAILING_FILLER.contains(&lowered.as_str())
            || TRAILING_CONNECTORS.contains(&lowered.as_str())
        {
            words.pop();
        } else {
            break;
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> serde_json::Value {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let blob = KeywordOracle::new().extract_blob(text, today);
        serde_json::from_str(&blob).unwrap()
    }

    #[test]
    fn extracts_english_order_phrase() {
        let value = extract("Order 20 units of Keratin Shampoo 1 L");
        assert_eq!(value["DocumentLines"][0]["ItemName"], "Keratin Shampoo 1 L");
        assert_eq!(value["DocumentLines"][0]["Quantity"], 20);
        assert_eq!(value["DocDate"], "2024-01-01");
        assert_eq!(value["DocDueDate"], "2024-01-31");
    }

    #[test]
    fn extracts_arabic_order_phrase() {
        let value = extract("اطلب 50 كيس من شكاره فاصوليا 20ك");
        assert_eq!(value["DocumentLines"][0]["ItemName"], "شكاره فاصوليا 20ك");
        assert_eq!(value["DocumentLines"][0]["Quantity"], 50);
    }

    #[test]
    fn extracts_arabic_want_phrase() {
        let value = extract("أريد 10 من فاصوليا خام");
        assert_eq!(value["DocumentLines"][0]["ItemName"], "فاصوليا خام");
        assert_eq!(value["DocumentLines"][0]["Quantity"], 10);
    }

    #[test]
    fn converts_arabic_indic_digits() {
        let value = extract("اطلب ٥٠ وحدة من شكاره");
        assert_eq!(value["DocumentLines"][0]["Quantity"], 50);
    }

    #[test]
    fn captures_email_and_keeps_it_out_of_the_item() {
        let value = extract("order 5 Test Item for test@example.com");
        assert_eq!(value["Email"], "test@example.com");
        assert_eq!(value["DocumentLines"][0]["ItemName"], "Test Item");
        assert_eq!(value["DocumentLines"][0]["Quantity"], 5);
    }

    #[test]
    fn strips_trailing_filler() {
        let value = extract("I need 10 Office Chair With a stand urgently");
        assert_eq!(value["DocumentLines"][0]["ItemName"], "Office Chair With a stand");
    }

    #[test]
    fn no_order_phrase_yields_empty_object() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(KeywordOracle::new().extract_blob("hello", today), "{}");
        assert_eq!(KeywordOracle::new().extract_blob("", today), "{}");
    }

    #[test]
    fn quantity_of_zero_is_not_an_order() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let blob = KeywordOracle::new().extract_blob("order 0 Test Item", today);
        assert_eq!(blob, "{}");
    }

    #[test]
    fn item_starting_with_of_is_kept_whole() {
        let value = extract("Buy 5 Office Chair With a stand");
        assert_eq!(value["DocumentLines"][0]["ItemName"], "Office Chair With a stand");
    }
}

//! Script detection for template selection.
//!
//! The handler answers in Arabic when the request contains Arabic script and
//! in English otherwise. This is a character-class membership test, not
//! language inference: one Arabic-block character is enough to select the
//! Arabic template set.

use serde::{Deserialize, Serialize};

/// Template set selected for a single request.
///
/// Detected once per request and threaded through response building, so every
/// return path renders in the same language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Request contained at least one character in the Arabic Unicode block.
    Arabic,
    /// Everything else.
    Default,
}

impl Language {
    /// Detects the template set for a piece of user text.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_arabic_char) {
            Language::Arabic
        } else {
            Language::Default
        }
    }

    /// Returns true if the Arabic template set was selected.
    pub fn is_arabic(&self) -> bool {
        matches!(self, Language::Arabic)
    }
}

/// Membership in the Arabic Unicode block plus its common supplements.
fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08FF}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_arabic_text() {
        assert_eq!(Language::detect("اطلب 50 وحدة من شكاره"), Language::Arabic);
    }

    #[test]
    fn detects_english_text() {
        assert_eq!(Language::detect("order 5 Test Item"), Language::Default);
    }

    #[test]
    fn single_arabic_character_selects_arabic() {
        assert_eq!(Language::detect("order 5 of ك"), Language::Arabic);
    }

    #[test]
    fn empty_input_defaults() {
        assert_eq!(Language::detect(""), Language::Default);
    }

    #[test]
    fn digits_and_punctuation_default() {
        assert_eq!(Language::detect("123 ?! ..."), Language::Default);
    }

    #[test]
    fn presentation_forms_count_as_arabic() {
        // U+FE8D ARABIC LETTER ALEF ISOLATED FORM
        assert_eq!(Language::detect("\u{FE8D}"), Language::Arabic);
    }
}

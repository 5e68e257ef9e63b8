//! Fixed bilingual reply templates.
//!
//! Every user-facing message is rendered from this set in the language
//! detected for the request. No stack traces or internal identifiers ever
//! reach the end user; internal faults all collapse into [`try_again`].

use crate::domain::language::Language;

/// Required order fields could not be extracted from the request.
pub fn incomplete(lang: Language) -> String {
    match lang {
        Language::Arabic => "البيانات غير مكتملة. من فضلك حدد المنتج والكمية والتاريخ.".to_string(),
        Language::Default => {
            "Incomplete input. Please specify the product, quantity, and date.".to_string()
        }
    }
}

/// A requested item has no exact match in the catalog.
pub fn item_not_found(lang: Language, item: &str) -> String {
    match lang {
        Language::Arabic => format!("لم يتم العثور على منتج باسم {item}. من فضلك وضح اسم المنتج."),
        Language::Default => format!("No product named {item} found. Please specify the product name."),
    }
}

/// The customer reference could not be resolved to a card code.
pub fn customer_not_found(lang: Language) -> String {
    match lang {
        Language::Arabic => "لم يتم العثور على العميل. من فضلك وضح بيانات العميل.".to_string(),
        Language::Default => {
            "No matching customer found. Please provide the customer details.".to_string()
        }
    }
}

/// The order was created; summarizes quantity/item pairs.
pub fn order_placed(lang: Language, summary: &str) -> String {
    match lang {
        Language::Arabic => format!("تم تسجيل طلبك لـ {summary}."),
        Language::Default => format!("Order placed: {summary}."),
    }
}

/// Generic retry prompt for ERP rejections and internal faults.
pub fn try_again(lang: Language) -> String {
    match lang {
        Language::Arabic => "حدث خطأ، من فضلك حاول مرة أخرى.".to_string(),
        Language::Default => "An error occurred. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_renders_per_language() {
        assert!(incomplete(Language::Default).starts_with("Incomplete"));
        assert!(incomplete(Language::Arabic).contains("غير مكتملة"));
    }

    #[test]
    fn item_not_found_names_the_item() {
        let msg = item_not_found(Language::Default, "Keratin Shampoo 1 L");
        assert!(msg.contains("Keratin Shampoo 1 L"));

        let msg = item_not_found(Language::Arabic, "شكاره");
        assert!(msg.contains("شكاره"));
    }

    #[test]
    fn order_placed_includes_summary() {
        let msg = order_placed(Language::Default, "5 units of T001");
        assert_eq!(msg, "Order placed: 5 units of T001.");
    }

    #[test]
    fn try_again_is_generic() {
        let msg = try_again(Language::Default);
        assert!(!msg.contains("error:"));
        assert_eq!(msg, "An error occurred. Please try again.");
    }
}

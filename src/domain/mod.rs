//! Domain layer - order intent, payload construction, and bilingual replies.

pub mod language;
pub mod order;
pub mod reply;

pub use language::Language;

//! Extraction Oracle Adapters.
//!
//! Implementations of the ExtractionOracle port.
//!
//! ## Available Adapters
//!
//! - `OllamaOracle` - Generative model behind an Ollama-style endpoint
//! - `KeywordOracle` - Offline keyword-rule extraction, no model required
//! - `ScriptedOracle` - Configurable canned oracle for testing

mod keyword;
mod ollama;
mod scripted;

pub use keyword::KeywordOracle;
pub use ollama::{OllamaConfig, OllamaOracle};
pub use scripted::{ScriptedOracle, ScriptedReply};

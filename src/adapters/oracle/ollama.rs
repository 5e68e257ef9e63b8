//! Ollama Oracle - generative extraction behind an Ollama-style endpoint.
//!
//! Sends the user's text wrapped in an order-extraction instruction to a
//! local generation endpoint and returns the model's raw answer. The answer
//! is expected (not guaranteed) to be a single JSON object in the
//! order-intent shape; normalization downstream deals with everything else.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OllamaConfig::new("http://localhost:11434/api/generate")
//!     .with_model("deepseek-r1:7b");
//!
//! let oracle = OllamaOracle::new(config);
//! ```

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::ports::{ExtractionOracle, OracleError};

/// Configuration for the Ollama oracle.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Full URL of the generate endpoint.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OllamaConfig {
    /// Creates a new configuration for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: "deepseek-r1:7b".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Generative extraction oracle.
pub struct OllamaOracle {
    config: OllamaConfig,
    client: Client,
}

impl OllamaOracle {
    /// Creates a new oracle with the given configuration.
    pub fn new(config: OllamaConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn generate(&self, prompt: String) -> Result<String, OracleError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "oracle endpoint returned an error status");
            return Err(OracleError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Unreadable(e.to_string()))?;

        Ok(body.response)
    }
}

#[async_trait]
impl ExtractionOracle for OllamaOracle {
    async fn extract(&self, text: &str) -> Result<String, OracleError> {
        let today = Utc::now().date_naive();
        self.generate(extraction_prompt(text, today)).await
    }

    fn backend_name(&self) -> &'static str {
        "ollama"
    }
}

/// Builds the order-extraction instruction around the user's text.
///
/// Due date defaults to thirty days after the document date; the model is
/// told both so it does not invent its own calendar.
fn extraction_prompt(user_input: &str, today: NaiveDate) -> String {
    let due = today + ChronoDuration::days(30);
    format!(
        concat!(
            "Given the input string: \"{input}\", extract the sales order it describes. ",
            "Respond with entities in the following format: ",
            "{{\"Email\": \"<customer_email>\", \"CustomerName\": \"<customer_name>\", ",
            "\"CardCode\": \"<customer_code>\", \"DocDate\": \"{today}\", ",
            "\"DocDueDate\": \"{due}\", ",
            "\"DocumentLines\": [{{\"ItemName\": \"<item_name>\", \"Quantity\": <quantity>}}]}} ",
            "Omit fields the input does not mention. ",
            "Respond ONLY with a single raw JSON object. Do not add any explanations, ",
            "greetings, or commentary before or after the JSON. ",
            "Your entire response MUST start and end with {{}} and contain nothing else."
        ),
        input = user_input,
        today = today,
        due = due,
    )
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OllamaConfig::new("http://localhost:11434/api/generate")
            .with_model("llama3")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.base_url, "http://localhost:11434/api/generate");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn prompt_carries_input_and_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prompt = extraction_prompt("order 5 Test Item", today);

        assert!(prompt.contains("order 5 Test Item"));
        assert!(prompt.contains("\"DocDate\": \"2024-01-01\""));
        assert!(prompt.contains("\"DocDueDate\": \"2024-01-31\""));
        assert!(prompt.contains("DocumentLines"));
    }

    #[test]
    fn prompt_demands_raw_json_only() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prompt = extraction_prompt("hello", today);
        assert!(prompt.contains("Respond ONLY with a single raw JSON object"));
    }

    #[test]
    fn generate_response_parses() {
        let body = r#"{"model": "deepseek-r1:7b", "response": "{\"DocDate\": \"2024-01-01\"}", "done": true}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.response.contains("DocDate"));
    }
}

//! Extraction oracle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Extraction oracle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Which extraction backend to use
    #[serde(default)]
    pub backend: OracleBackend,

    /// Generation endpoint for the generative backend,
    /// e.g. `http://localhost:11434/api/generate`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name for the generative backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Extraction backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    /// Generative model behind an Ollama-style generate endpoint
    #[default]
    Ollama,
    /// Offline keyword-rule extraction, no model required
    Keyword,
}

impl OracleConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate oracle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == OracleBackend::Ollama {
            if self.base_url.is_empty() {
                return Err(ValidationError::MissingRequired("oracle base_url"));
            }
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidOracleUrl);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: OracleBackend::default(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "deepseek-r1:7b".to_string()
}

fn default_timeout() -> u64 {
    60
}

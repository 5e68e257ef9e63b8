//! SAP B1 Service Layer configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Service Layer connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ErpConfig {
    /// Base URL of the Service Layer, e.g. `https://host:50000/b1s/v1`
    pub base_url: String,

    /// Company database to log into
    pub company_db: String,

    /// Service Layer user name
    pub username: String,

    /// Service Layer password
    pub password: Secret<String>,

    /// Verify TLS certificates (disable only against test hosts)
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ErpConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Exposes the password (for the login payload)
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Validate Service Layer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("ERP base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidServiceLayerUrl);
        }
        if self.company_db.is_empty() {
            return Err(ValidationError::MissingRequired("ERP company_db"));
        }
        if self.username.is_empty() {
            return Err(ValidationError::MissingRequired("ERP username"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_verify_ssl() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

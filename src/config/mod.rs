//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `ORDER_DESK` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use order_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod erp;
mod error;
mod oracle;
mod order;

pub use erp::ErpConfig;
pub use error::{ConfigError, ValidationError};
pub use oracle::{OracleBackend, OracleConfig};
pub use order::{OrderConfig, UnresolvedCustomerAction};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Service Layer connection (host, company, credentials)
    pub erp: ErpConfig,

    /// Extraction oracle (backend, endpoint, model)
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Order resolution policy
    #[serde(default)]
    pub order: OrderConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables with
    /// the `ORDER_DESK` prefix using `__` to separate nested values:
    ///
    /// - `ORDER_DESK__ERP__BASE_URL=https://host:50000/b1s/v1`
    /// - `ORDER_DESK__ORACLE__BACKEND=keyword`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ORDER_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.erp.validate()?;
        self.oracle.validate()?;
        self.order.validate()?;
        Ok(())
    }
}

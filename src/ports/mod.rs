//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! pipeline and the outside world. Adapters implement these ports.
//!
//! - `ExtractionOracle` - Best-effort structured extraction from free text
//! - `CatalogReader` - Read-only master-data lookups (customers, items)
//! - `OrderGateway` - Sales-order submission

mod erp;
mod extraction_oracle;

pub use erp::{CatalogReader, ErpError, OrderGateway, OrderOutcome};
pub use extraction_oracle::{ExtractionOracle, OracleError};

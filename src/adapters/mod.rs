//! Adapters - Implementations of port interfaces.
//!
//! - `oracle` - Extraction oracle backends (generative, keyword-rule, scripted)
//! - `erp` - SAP B1 Service Layer client

pub mod erp;
pub mod oracle;

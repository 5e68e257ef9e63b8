//! Order Desk - Bilingual sales-order chatbot backend.
//!
//! Turns free-text English/Arabic chat requests into validated sales orders
//! against the SAP Business One Service Layer. A pluggable extraction oracle
//! infers the order intent from the text; the intent is normalized, resolved
//! against master data, and submitted through a session-authenticated client
//! that reauthenticates transparently when the session expires.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! ERP Adapters.
//!
//! The Service Layer client implements both ERP ports (`CatalogReader`,
//! `OrderGateway`) over a session-authenticated REST connection with
//! transparent reauthentication. The transport trait underneath it is the
//! seam that lets the session state machine be tested without a live host.

mod service_layer;
mod transport;

pub use service_layer::{ServiceLayerClient, ServiceLayerConfig};
pub use transport::{ReqwestTransport, ServiceLayerTransport, SlMethod, SlRequest, SlResponse};

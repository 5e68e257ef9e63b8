//! Scripted Oracle for testing.
//!
//! Configurable implementation of the ExtractionOracle port so tests can run
//! the pipeline without a model or network.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let oracle = ScriptedOracle::new()
//!     .with_blob(r#"{"DocDate": "2024-01-01", ...}"#);
//!
//! let blob = oracle.extract("order 5 Test Item").await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{ExtractionOracle, OracleError};

/// A configured scripted reply.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this raw blob.
    Blob(String),
    /// Fail with an unreachable-backend error.
    Unreachable,
}

/// Scripted extraction oracle for tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedOracle {
    /// Creates a new scripted oracle with no replies configured.
    ///
    /// With an empty script every call returns `{}`, which normalizes to an
    /// incomplete intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw blob reply.
    pub fn with_blob(self, blob: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Blob(blob.into()));
        self
    }

    /// Queues an unreachable-backend error.
    pub fn with_unreachable(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Unreachable);
        self
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Texts passed to `extract`, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionOracle for ScriptedOracle {
    async fn extract(&self, text: &str) -> Result<String, OracleError> {
        self.calls.lock().unwrap().push(text.to_string());

        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Blob(blob)) => Ok(blob),
            Some(ScriptedReply::Unreachable) => {
                Err(OracleError::Unreachable("scripted failure".to_string()))
            }
            None => Ok("{}".to_string()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let oracle = ScriptedOracle::new().with_blob("first").with_blob("second");

        assert_eq!(oracle.extract("a").await.unwrap(), "first");
        assert_eq!(oracle.extract("b").await.unwrap(), "second");
        assert_eq!(oracle.extract("c").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn errors_can_be_injected() {
        let oracle = ScriptedOracle::new().with_unreachable();
        assert!(oracle.extract("a").await.is_err());
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let oracle = ScriptedOracle::new();
        let _ = oracle.extract("order 5 Test Item").await;

        assert_eq!(oracle.call_count(), 1);
        assert_eq!(oracle.calls(), vec!["order 5 Test Item".to_string()]);
    }
}

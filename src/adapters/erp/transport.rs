//! HTTP transport seam under the Service Layer client.
//!
//! The client's session state machine only needs "send this request, give me
//! a status and a body". Pulling that behind a trait keeps reqwest at the
//! edge and lets the reauthentication logic run against a scripted transport
//! in tests.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::ErpError;

/// HTTP method for a Service Layer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlMethod {
    Get,
    Post,
}

/// One outgoing Service Layer request.
#[derive(Debug, Clone)]
pub struct SlRequest {
    pub method: SlMethod,
    pub url: String,
    /// `Cookie` header value carrying the session tokens, when authenticated.
    pub cookie: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl SlRequest {
    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: SlMethod::Get,
            url: url.into(),
            cookie: None,
            body: None,
        }
    }

    /// Creates a POST request with a JSON body.
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: SlMethod::Post,
            url: url.into(),
            cookie: None,
            body: Some(body),
        }
    }

    /// Attaches the session cookie header.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

/// Raw response from the Service Layer.
#[derive(Debug, Clone)]
pub struct SlResponse {
    pub status: u16,
    pub body: String,
}

impl SlResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport for Service Layer requests.
#[async_trait]
pub trait ServiceLayerTransport: Send + Sync {
    /// Executes one request. `Err` means the call never produced a response.
    async fn execute(&self, request: SlRequest) -> Result<SlResponse, ErpError>;
}

/// Production transport over reqwest.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the transport.
    ///
    /// `verify_ssl = false` accepts invalid certificates, which test-stage
    /// Service Layer hosts commonly present.
    pub fn new(timeout: Duration, verify_ssl: bool) -> Result<Self, ErpError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .map_err(|e| ErpError::transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ServiceLayerTransport for ReqwestTransport {
    async fn execute(&self, request: SlRequest) -> Result<SlResponse, ErpError> {
        let mut builder = match request.method {
            SlMethod::Get => self.client.get(&request.url),
            SlMethod::Post => self.client.post(&request.url),
        };
        if let Some(cookie) = &request.cookie {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ErpError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ErpError::transport(e.to_string()))?;

        Ok(SlResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders_set_fields() {
        let request = SlRequest::get("https://host/b1s/v1/Items").with_cookie("B1SESSION=s1");
        assert_eq!(request.method, SlMethod::Get);
        assert_eq!(request.cookie.as_deref(), Some("B1SESSION=s1"));
        assert!(request.body.is_none());

        let request = SlRequest::post("https://host/b1s/v1/Orders", serde_json::json!({"a": 1}));
        assert_eq!(request.method, SlMethod::Post);
        assert!(request.body.is_some());
    }

    #[test]
    fn success_covers_2xx_only() {
        let ok = SlResponse { status: 201, body: String::new() };
        assert!(ok.is_success());

        let auth = SlResponse { status: 401, body: String::new() };
        assert!(!auth.is_success());
    }
}

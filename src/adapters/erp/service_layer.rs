//! Service Layer Client - session-authenticated SAP B1 REST access.
//!
//! Owns the session lifecycle as an explicit state machine:
//!
//! ```text
//! Unauthenticated -> (login ok) -> Authenticated
//! Authenticated   -> (call returns 401) -> Unauthenticated -> (re-login) -> Authenticated
//! any             -> (login fails) -> LoginFailed (terminal, fail fast)
//! ```
//!
//! A call that hits an expired session triggers exactly one re-login and one
//! retry; a second authorization failure propagates as an error, so there is
//! no auth ping-pong. Login and reauthentication are serialized behind one
//! mutex; authenticated calls only hold it long enough to clone the tokens.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::transport::{ReqwestTransport, ServiceLayerTransport, SlMethod, SlRequest, SlResponse};
use crate::config::ErpConfig;
use crate::domain::order::{OrderConfirmation, ResolvedOrderPayload};
use crate::ports::{CatalogReader, ErpError, OrderGateway, OrderOutcome};

/// Status the Service Layer uses for an invalid or expired session.
const AUTH_EXPIRED: u16 = 401;

/// Longest response-body slice carried into errors and logs.
const BODY_SNIPPET_LEN: usize = 300;

/// Configuration for the Service Layer client.
#[derive(Debug, Clone)]
pub struct ServiceLayerConfig {
    /// Base URL, e.g. `https://host:50000/b1s/v1`.
    pub base_url: String,
    /// Company database for the login payload.
    pub company_db: String,
    /// Service Layer user.
    pub username: String,
    /// Service Layer password.
    password: Secret<String>,
    /// Verify TLS certificates.
    pub verify_ssl: bool,
    /// Request timeout.
    pub timeout: Duration,
}

impl ServiceLayerConfig {
    /// Creates a new configuration.
    pub fn new(
        base_url: impl Into<String>,
        company_db: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            company_db: company_db.into(),
            username: username.into(),
            password: Secret::new(password.into()),
            verify_ssl: true,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets TLS verification.
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl From<&ErpConfig> for ServiceLayerConfig {
    fn from(config: &ErpConfig) -> Self {
        ServiceLayerConfig::new(
            &config.base_url,
            &config.company_db,
            &config.username,
            config.password(),
        )
        .with_verify_ssl(config.verify_ssl)
        .with_timeout(config.timeout())
    }
}

/// Session tokens returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionTokens {
    session_id: String,
    route_id: Option<String>,
}

impl SessionTokens {
    /// Cookie header value carrying the tokens on subsequent calls.
    fn cookie(&self) -> String {
        match &self.route_id {
            Some(route) => format!("B1SESSION={}; ROUTEID={}", self.session_id, route),
            None => format!("B1SESSION={}", self.session_id),
        }
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone)]
enum SessionState {
    Unauthenticated,
    Authenticated(SessionTokens),
    /// Login itself failed; every operation fails fast from here.
    LoginFailed,
}

/// Session-authenticated Service Layer client.
///
/// One instance may be reused across many conversations; the session is the
/// only shared mutable state and its transitions are serialized internally.
pub struct ServiceLayerClient {
    config: ServiceLayerConfig,
    transport: Arc<dyn ServiceLayerTransport>,
    session: Mutex<SessionState>,
}

impl ServiceLayerClient {
    /// Connects and performs the initial login.
    ///
    /// A failed login here is a fatal initialization error: the client is
    /// never constructed, so no conversation handler can exist without a
    /// working ERP connection.
    pub async fn connect(config: ServiceLayerConfig) -> Result<Self, ErpError> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout, config.verify_ssl)?);
        Self::with_transport(config, transport).await
    }

    /// Connects over an explicit transport.
    ///
    /// Tests substitute a scripted transport here; `connect` is the
    /// production path.
    pub async fn with_transport(
        config: ServiceLayerConfig,
        transport: Arc<dyn ServiceLayerTransport>,
    ) -> Result<Self, ErpError> {
        let client = Self {
            config,
            transport,
            session: Mutex::new(SessionState::Unauthenticated),
        };
        let tokens = client.login().await?;
        *client.session.lock().await = SessionState::Authenticated(tokens);
        Ok(client)
    }

    /// Performs the login exchange. Does not touch session state.
    async fn login(&self) -> Result<SessionTokens, ErpError> {
        let body = json!({
            "CompanyDB": self.config.company_db,
            "UserName": self.config.username,
            "Password": self.config.password(),
        });
        let request = SlRequest::post(format!("{}/Login", self.config.base_url), body);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| ErpError::LoginFailed { message: e.to_string() })?;

        if !response.is_success() {
            return Err(ErpError::LoginFailed {
                message: format!("status {}: {}", response.status, snippet(&response.body)),
            });
        }

        let parsed: LoginBody = serde_json::from_str(&response.body).map_err(|e| {
            ErpError::LoginFailed {
                message: format!("unreadable login response: {e}"),
            }
        })?;

        info!(base_url = %self.config.base_url, company = %self.config.company_db,
            "logged into the service layer");

        Ok(SessionTokens {
            session_id: parsed.session_id,
            route_id: parsed.route_id,
        })
    }

    /// Returns current tokens, logging in first if unauthenticated.
    ///
    /// Holds the session lock across the login so at most one login is in
    /// flight at a time.
    async fn ensure_session(&self) -> Result<SessionTokens, ErpError> {
        let mut state = self.session.lock().await;
        match &*state {
            SessionState::Authenticated(tokens) => Ok(tokens.clone()),
            SessionState::LoginFailed => Err(fail_fast()),
            SessionState::Unauthenticated => match self.login().await {
                Ok(tokens) => {
                    *state = SessionState::Authenticated(tokens.clone());
                    Ok(tokens)
                }
                Err(err) => {
                    *state = SessionState::LoginFailed;
                    Err(err)
                }
            },
        }
    }

    /// Replaces a session the server rejected.
    ///
    /// If another caller already renewed while we waited for the lock, its
    /// tokens are reused instead of racing a second reauthentication.
    async fn renew_session(&self, stale: &SessionTokens) -> Result<SessionTokens, ErpError> {
        let mut state = self.session.lock().await;
        match &*state {
            SessionState::Authenticated(current) if current.session_id != stale.session_id => {
                return Ok(current.clone());
            }
            SessionState::LoginFailed => return Err(fail_fast()),
            _ => {}
        }

        *state = SessionState::Unauthenticated;
        match self.login().await {
            Ok(tokens) => {
                *state = SessionState::Authenticated(tokens.clone());
                Ok(tokens)
            }
            Err(err) => {
                *state = SessionState::LoginFailed;
                Err(err)
            }
        }
    }

    async fn send(
        &self,
        tokens: &SessionTokens,
        method: SlMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<SlResponse, ErpError> {
        let request = SlRequest {
            method,
            url: format!("{}/{}", self.config.base_url, path),
            cookie: Some(tokens.cookie()),
            body,
        };
        self.transport.execute(request).await
    }

    /// Issues one call with transparent reauthentication.
    ///
    /// On an authorization-expired response, re-logs-in once and retries
    /// once; a second expiry fails the request.
    pub async fn request(
        &self,
        method: SlMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<SlResponse, ErpError> {
        let tokens = self.ensure_session().await?;
        let response = self.send(&tokens, method, path, body.clone()).await?;
        if response.status != AUTH_EXPIRED {
            return Ok(response);
        }

        warn!(path, "service layer session expired, renewing");
        let renewed = self.renew_session(&tokens).await?;
        let response = self.send(&renewed, method, path, body).await?;
        if response.status == AUTH_EXPIRED {
            return Err(ErpError::SessionNotRenewable);
        }
        Ok(response)
    }

    /// Logs the session out. Failures are logged, not surfaced.
    pub async fn close(&self) {
        let mut state = self.session.lock().await;
        if let SessionState::Authenticated(tokens) = &*state {
            let request = SlRequest::post(format!("{}/Logout", self.config.base_url), json!({}))
                .with_cookie(tokens.cookie());
            if let Err(err) = self.transport.execute(request).await {
                warn!(error = %err, "service layer logout failed");
            } else {
                info!("service layer session closed");
            }
        }
        *state = SessionState::Unauthenticated;
    }

    /// Runs an exact-match catalog query and returns the first row's key.
    async fn query_key(
        &self,
        resource: &str,
        filter_field: &str,
        filter_value: &str,
        key: &str,
    ) -> Result<Option<String>, ErpError> {
        let path = format!(
            "{resource}?$filter={filter_field} eq '{}'&$select={key}",
            odata_quote(filter_value)
        );
        let response = self.request(SlMethod::Get, &path, None).await?;
        if !response.is_success() {
            return Err(ErpError::UnexpectedStatus {
                status: response.status,
                body: snippet(&response.body),
            });
        }

        let parsed: QueryBody = serde_json::from_str(&response.body)
            .map_err(|e| ErpError::parse(e.to_string()))?;

        Ok(parsed
            .value
            .into_iter()
            .next()
            .and_then(|row| row.get(key).and_then(|v| v.as_str().map(String::from))))
    }
}

#[async_trait]
impl CatalogReader for ServiceLayerClient {
    async fn customer_by_email(&self, email: &str) -> Result<Option<String>, ErpError> {
        self.query_key("BusinessPartners", "EmailAddress", email, "CardCode")
            .await
    }

    async fn customer_by_name(&self, name: &str) -> Result<Option<String>, ErpError> {
        self.query_key("BusinessPartners", "CardName", name, "CardCode")
            .await
    }

    async fn item_by_name(&self, name: &str) -> Result<Option<String>, ErpError> {
        self.query_key("Items", "ItemName", name, "ItemCode").await
    }
}

#[async_trait]
impl OrderGateway for ServiceLayerClient {
    async fn place_order(&self, payload: &ResolvedOrderPayload) -> Result<OrderOutcome, ErpError> {
        let body = serde_json::to_value(payload).map_err(|e| ErpError::parse(e.to_string()))?;
        let response = self.request(SlMethod::Post, "Orders", Some(body)).await?;

        if response.is_success() {
            // Confirmation fields are informational; a creation status with
            // an unreadable body is still a created order.
            let confirmation: OrderConfirmation =
                serde_json::from_str(&response.body).unwrap_or_default();
            info!(card_code = %payload.card_code, doc_num = ?confirmation.doc_num,
                "sales order created");
            return Ok(OrderOutcome::Created(confirmation));
        }

        error!(status = response.status, body = %snippet(&response.body),
            "service layer rejected the order");
        Ok(OrderOutcome::Rejected {
            message: snippet(&response.body),
        })
    }
}

/// Fail-fast error used once the client has entered `LoginFailed`.
fn fail_fast() -> ErpError {
    ErpError::LoginFailed {
        message: "previous login failed; not retrying".to_string(),
    }
}

/// Escapes a string literal for an OData `$filter` clause.
fn odata_quote(value: &str) -> String {
    value.replace('\'', "''")
}

/// Truncates a response body for logs and error payloads.
fn snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_LEN {
        return body.to_string();
    }
    let mut end = BODY_SNIPPET_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

// ----- Wire types -----

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(rename = "SessionId")]
    session_id: String,
    #[serde(rename = "RouteId")]
    route_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    value: Vec<serde_json::Map<String, serde_json::Value>>,
}

// Gateway HTTP client
//
// Wraps `reqwest::Client` with gateway-specific URL construction and
// session-cookie header injection. The session lifecycle (login, validate,
// logout) and the read endpoints are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Method;
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Haivision Media Gateway REST API.
///
/// Holds the opaque session token issued by `POST /api/session` and stamps
/// `Cookie: sessionID={token}` plus `Content-Type: application/json` onto
/// every request once a token is held. The token slot is interior-mutable
/// so an authenticated client can be shared behind `&self`.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    /// Opaque session token. `None` until login succeeds; cleared on
    /// logout whether or not the remote call worked.
    session_id: RwLock<Option<String>>,
}

impl GatewayClient {
    /// Create a new client from a base URL, credentials, and transport config.
    ///
    /// The `base_url` is the gateway root (e.g. `https://10.0.0.5:443`).
    /// Does not contact the gateway -- call
    /// [`ensure_authenticated`](Self::ensure_authenticated) before fetching.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username,
            password,
            session_id: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
            session_id: RwLock::new(None),
        }
    }

    /// The gateway base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The login username.
    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    /// The login password.
    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    // ── Session token management ─────────────────────────────────────

    /// Returns `true` if a session token is currently held.
    pub fn has_session(&self) -> bool {
        self.session_id
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    /// The current session token, if any.
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .read()
            .expect("session lock poisoned")
            .clone()
    }

    pub(crate) fn set_session_id(&self, token: String) {
        debug!("storing session token");
        *self.session_id.write().expect("session lock poisoned") = Some(token);
    }

    pub(crate) fn clear_session_id(&self) {
        *self.session_id.write().expect("session lock poisoned") = None;
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path, e.g. `api_url("devices")` ->
    /// `{base}/api/devices`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        // Base URL is validated at construction; a path from the fixed
        // command set cannot make this fail.
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with the gateway's standard headers applied.
    pub(crate) fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session_id() {
            builder = builder.header(COOKIE, format!("sessionID={token}"));
        }
        builder
    }

    /// Send a GET request to an API path and parse the JSON body.
    ///
    /// Any transport failure, non-success status, or unparsable body is an
    /// [`Error::Unreachable`] -- the monitoring contract does not retry.
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, Error> {
        let url = self.api_url(path);
        debug!("GET {}", url);

        let resp = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {path} failed"), e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::unreachable(format!("GET {path}: HTTP {status}")));
        }

        resp.json()
            .await
            .map_err(|e| Error::transport(format!("GET {path}: invalid JSON body"), e))
    }
}

// Session authentication
//
// Cookie-based session lifecycle against `/api/session`. The gateway
// issues an opaque token on login; every later call carries it as
// `Cookie: sessionID={token}`. Validation is opportunistic: any failure
// to confirm the session is treated as "invalid, log in again", never
// propagated.

use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::SessionResponse;

const SESSION_PATH: &str = "session";

impl GatewayClient {
    /// Make sure a usable session token is held.
    ///
    /// No token -> [`login`](Self::login). Token held -> probe it with
    /// `GET /api/session` and re-login if the probe fails for any reason.
    /// After this returns `Ok`, a non-empty token is held.
    pub async fn ensure_authenticated(&self) -> Result<(), Error> {
        if !self.has_session() {
            return self.login().await;
        }
        if !self.session_valid().await {
            info!("session token no longer valid, logging in again");
            return self.login().await;
        }
        Ok(())
    }

    /// Authenticate with the gateway using username/password.
    ///
    /// `POST /api/session` with `{username, password}`; expects
    /// `{response: {sessionID}}`. A 401/403 is an
    /// [`Error::Authentication`]; any other failure -- transport, bad
    /// status, missing token field -- is [`Error::Unreachable`].
    pub async fn login(&self) -> Result<(), Error> {
        let url = self.api_url(SESSION_PATH);
        debug!("logging in at {}", url);

        let body = json!({
            "username": self.username(),
            "password": self.password().expose_secret(),
        });

        let resp = self
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::transport("unable to retrieve the session token, endpoint not reachable", e)
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            self.clear_session_id();
            return Err(Error::Authentication {
                message: "unable to login, check device credentials".into(),
            });
        }
        if !status.is_success() {
            self.clear_session_id();
            return Err(Error::unreachable(format!(
                "login failed with HTTP {status}"
            )));
        }

        let envelope: SessionResponse = resp.json().await.map_err(|e| {
            Error::transport("unable to retrieve the session token, endpoint not reachable", e)
        })?;

        match envelope.response.and_then(|r| r.session_id) {
            Some(token) if !token.is_empty() => {
                self.set_session_id(token);
                debug!("login successful");
                Ok(())
            }
            _ => {
                self.clear_session_id();
                Err(Error::unreachable(
                    "login response carried no session token",
                ))
            }
        }
    }

    /// Probe the current session with `GET /api/session`.
    ///
    /// Returns `false` on any transport failure, non-success status,
    /// unparsable body, or a body carrying an `error` marker. Never
    /// propagates -- an unverifiable session is simply invalid.
    pub async fn session_valid(&self) -> bool {
        let url = self.api_url(SESSION_PATH);
        debug!("validating session at {}", url);

        let resp = match self.request(Method::GET, url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!(error = %e, "session probe failed");
                return false;
            }
        };
        if !resp.status().is_success() {
            return false;
        }
        match resp.json::<serde_json::Value>().await {
            Ok(body) => body.get("error").is_none(),
            Err(_) => false,
        }
    }

    /// End the current session.
    ///
    /// `DELETE /api/session`, best-effort: failures are logged and
    /// ignored. The stored token is cleared either way.
    pub async fn logout(&self) {
        let url = self.api_url(SESSION_PATH);
        debug!("logging out at {}", url);

        match self.request(Method::DELETE, url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("session deleted");
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "logout rejected by gateway");
            }
            Err(e) => {
                warn!(error = %e, "logout request failed");
            }
        }
        self.clear_session_id();
    }
}

// ── Runtime monitor configuration ──
//
// These types describe *how* to reach a gateway and which routes to
// report on. They carry credential data and connection tuning, but never
// touch disk -- the CLI constructs a `MonitorConfig` and hands it in.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default: gateways ship self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for monitoring a single gateway.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Gateway URL (e.g., `https://10.0.0.5`).
    pub url: Url,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Route list page size. Must be large enough to capture every route
    /// in one call; the route fetch is never paginated further.
    pub route_page_size: u32,
    /// "Report every route" toggle, boolean-as-string. Unset or "false"
    /// (any case) means off; any other non-empty value means on.
    pub include_all_routes: Option<String>,
    /// Comma-separated route names to report when the toggle is off.
    pub route_name_filter: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            url: "https://127.0.0.1".parse().expect("static URL"),
            username: "admin".into(),
            password: SecretString::from(String::new()),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            route_page_size: 500,
            include_all_routes: None,
            route_name_filter: None,
        }
    }
}

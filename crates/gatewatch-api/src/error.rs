use thiserror::Error;

/// Top-level error type for the `gatewatch-api` crate.
///
/// The gateway adapter contract distinguishes exactly two remote failure
/// classes: bad credentials (surfaced, never retried) and everything else
/// on the wire (connection refused, timeouts, malformed bodies, missing
/// fields), which collapses into [`Unreachable`](Self::Unreachable).
/// `gatewatch-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// Login rejected by the gateway (wrong credentials, account locked).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The gateway could not be reached or returned an unusable response.
    #[error("gateway not reachable: {message}")]
    Unreachable {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Build an [`Unreachable`](Self::Unreachable) error without a source.
    pub(crate) fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
            source: None,
        }
    }

    /// Build an [`Unreachable`](Self::Unreachable) error from a transport failure.
    pub(crate) fn transport(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Unreachable {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns `true` if this error indicates rejected credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

// ── Core error types ──
//
// User-facing errors from gatewatch-core. Consumers never see reqwest
// errors directly; the `From<gatewatch_api::Error>` impl translates
// transport-layer failures into the monitoring taxonomy: credentials are
// wrong, or the gateway cannot be reached. Per-field formatting defects
// never surface here -- they are logged and rendered as "None".

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("gateway unreachable: {message}")]
    Unreachable { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<gatewatch_api::Error> for CoreError {
    fn from(err: gatewatch_api::Error) -> Self {
        match err {
            gatewatch_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            gatewatch_api::Error::Unreachable { message, .. } => {
                CoreError::Unreachable { message }
            }
            gatewatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            gatewatch_api::Error::Tls(message) => CoreError::Config { message },
        }
    }
}

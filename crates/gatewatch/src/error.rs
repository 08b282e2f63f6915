//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use gatewatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Gateway unreachable: {message}")]
    #[diagnostic(
        code(gatewatch::unreachable),
        help(
            "Check that the gateway is running and accessible.\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    GatewayUnreachable { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(gatewatch::auth_failed),
        help(
            "Verify the gateway username and password for profile '{profile}'.\n\
             Run: gatewatch config show"
        )
    )]
    AuthFailed { profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(gatewatch::no_credentials),
        help(
            "Configure credentials with: gatewatch config init\n\
             Or set GATEWATCH_USERNAME / GATEWATCH_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No gateway configured")]
    #[diagnostic(
        code(gatewatch::no_config),
        help(
            "Pass --gateway <URL>, or create a config file with: gatewatch config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gatewatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: gatewatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(gatewatch::config_exists),
        help("Use --force to overwrite: {path}")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(gatewatch::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gatewatch::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::GatewayUnreachable { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message: _ } => CliError::AuthFailed {
                profile: "current".into(),
            },
            CoreError::Unreachable { message } => CliError::GatewayUnreachable { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

//! CLI-owned configuration: TOML profiles, credential resolution, and
//! translation to `gatewatch_core::MonitorConfig`.
//!
//! Core never sees these types -- it receives a pre-built `MonitorConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use gatewatch_core::{MonitorConfig, TlsVerification};

use crate::cli::{GlobalOpts, PollArgs};
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

/// CLI-owned TOML configuration. Core never touches this type.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named gateway profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// CLI-owned profile definition.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Gateway base URL (e.g., "https://192.168.1.1").
    pub gateway: String,

    /// Login username.
    pub username: Option<String>,

    /// Login password (plaintext -- prefer password_env).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override route list page size.
    pub route_page_size: Option<u32>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "gatewatch", "gatewatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("gatewatch");
    p
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("GATEWATCH_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write a starter config file, creating parent directories as needed.
pub fn write_template(path: &std::path::Path) -> Result<(), CliError> {
    let mut config = Config::default();
    config.profiles.insert(
        "default".into(),
        Profile {
            gateway: "https://192.168.1.1".into(),
            username: Some("admin".into()),
            password: None,
            password_env: Some("GATEWATCH_PASSWORD".into()),
            ca_cert: None,
            insecure: Some(true),
            timeout: None,
            route_page_size: None,
        },
    );

    let rendered = toml::to_string_pretty(&config).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to render config template: {e}"),
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)?;
    Ok(())
}

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate config file, environment, and CLI flags into a
/// `MonitorConfig`.
///
/// This is the single boundary where CLI config types cross into core
/// types. Precedence for each knob is flag > profile > defaults.
pub fn resolve_monitor_config(
    global: &GlobalOpts,
    poll: &PollArgs,
) -> Result<MonitorConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // An explicitly requested profile must exist.
    if global.profile.is_some() && profile.is_none() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    let url_str = global
        .gateway
        .as_deref()
        .or(profile.map(|p| p.gateway.as_str()))
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "gateway".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let username = global
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;

    let password = resolve_password(global, profile, &profile_name)?;

    let insecure = global.insecure
        || profile
            .and_then(|p| p.insecure)
            .unwrap_or(cfg.defaults.insecure);
    let tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsVerification::CustomCa(ca)
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);

    let route_page_size = poll
        .page_size
        .or_else(|| profile.and_then(|p| p.route_page_size))
        .unwrap_or(500);

    Ok(MonitorConfig {
        url,
        username,
        password: SecretString::from(password),
        tls,
        timeout: Duration::from_secs(timeout),
        route_page_size,
        include_all_routes: poll.all_routes.then(|| "true".to_string()),
        route_name_filter: poll.routes.clone(),
    })
}

/// Resolve the password: flag/env > profile password_env indirection >
/// profile plaintext.
fn resolve_password(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<String, CliError> {
    if let Some(ref password) = global.password {
        return Ok(password.clone());
    }
    if let Some(profile) = profile {
        if let Some(ref var) = profile.password_env {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    return Ok(value);
                }
            }
        }
        if let Some(ref password) = profile.password {
            return Ok(password.clone());
        }
    }
    Err(CliError::NoCredentials {
        profile: profile_name.to_string(),
    })
}

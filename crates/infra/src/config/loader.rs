//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, if the required ones are present
//! 2. Otherwise a config file, either explicit or probed
//!
//! ## Environment Variables
//! - `CITADEL_BASE_URL`: service base URL (required)
//! - `CITADEL_PRE_SHARED_KEY`: HMAC signing key (required)
//! - `CITADEL_TIMEOUT_SECS`: per-request timeout in seconds
//! - `CITADEL_USER_AGENT`: `User-Agent` sent with every request
//!
//! ## File Locations
//! Probed in order, relative to the current working directory and then to
//! the executable:
//! 1. `citadel.json`, `citadel.toml`
//! 2. `config/citadel.json`, `config/citadel.toml`

use std::path::{Path, PathBuf};

use citadel_domain::constants::DEFAULT_TIMEOUT_SECS;
use citadel_domain::{CitadelError, ClientConfig, Result};

/// Base URL variable.
pub const ENV_BASE_URL: &str = "CITADEL_BASE_URL";
/// Signing key variable.
pub const ENV_PRE_SHARED_KEY: &str = "CITADEL_PRE_SHARED_KEY";
/// Timeout variable, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CITADEL_TIMEOUT_SECS";
/// User agent variable.
pub const ENV_USER_AGENT: &str = "CITADEL_USER_AGENT";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["citadel.json", "citadel.toml", "config/citadel.json", "config/citadel.toml"];

/// Load configuration, preferring the environment over files.
///
/// # Errors
/// Returns `CitadelError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::debug!("Citadel configuration loaded from environment");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `CITADEL_*` environment variables.
///
/// # Errors
/// Returns `CitadelError::Config` if a required variable is missing, the
/// timeout is not a number, or validation fails.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var(ENV_BASE_URL)?;
    let pre_shared_key = env_var(ENV_PRE_SHARED_KEY)?;

    let timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
            CitadelError::Config(format!("Invalid {ENV_TIMEOUT_SECS} value '{raw}': {e}"))
        })?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    let mut config = ClientConfig::new(base_url, pre_shared_key).with_timeout_secs(timeout_secs);
    if let Some(agent) = std::env::var(ENV_USER_AGENT).ok().filter(|s| !s.trim().is_empty()) {
        config = config.with_user_agent(agent);
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// With `None`, the first file found by [`probe_config_paths`] is used.
/// Format is chosen by extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `CitadelError::Config` if the file is missing, unreadable,
/// malformed, or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CitadelError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CitadelError::Config("No Citadel config file found in any standard location".into())
        })?,
    };

    tracing::debug!(path = %config_path.display(), "Loading Citadel configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CitadelError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CitadelError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CitadelError::Config(format!("Invalid JSON format: {e}"))),
        other => Err(CitadelError::Config(format!("Unsupported config format: {other}"))),
    }
}

/// First existing config file among the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CitadelError::Config(format!("Missing required environment variable: {key}"))),
    }
}

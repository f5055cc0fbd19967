//! Configuration loading for wattly.
//!
//! A YAML file with `URL`, `USER`, and `PASS` keys, located by
//! searching a directory, with environment variables of the same names
//! overriding file values. The URL is validated once at load time and
//! carried in canonical form.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Yaml},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config.yaml found in {dir}")]
    NotFound { dir: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config types ────────────────────────────────────────────────────

/// Raw file shape before validation. Key names follow the device
/// tooling convention (uppercase), same as the env override names.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "URL")]
    url: String,

    #[serde(rename = "USER")]
    user: String,

    #[serde(rename = "PASS")]
    pass: String,
}

/// Validated device configuration, immutable after construction.
#[derive(Debug)]
pub struct DeviceConfig {
    /// Device base URL in canonical form.
    pub url: Url,
    pub username: String,
    pub password: SecretString,
}

// ── Config file location ────────────────────────────────────────────

/// Locate the config file inside `dir` (`config.yaml`, then
/// `config.yml`).
pub fn config_path(dir: &Path) -> Option<PathBuf> {
    ["config.yaml", "config.yml"]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the device configuration from `dir`.
///
/// Environment variables named like the file keys (`URL`, `USER`,
/// `PASS`) override file values. The file itself is required even when
/// every value is overridden.
pub fn load(dir: &Path) -> Result<DeviceConfig, ConfigError> {
    let path = config_path(dir).ok_or_else(|| ConfigError::NotFound {
        dir: dir.display().to_string(),
    })?;

    let mut raw: RawConfig = Figment::new().merge(Yaml::file(path)).extract()?;

    // Environment overrides use the same names as the file keys.
    if let Ok(url) = std::env::var("URL") {
        raw.url = url;
    }
    if let Ok(user) = std::env::var("USER") {
        raw.user = user;
    }
    if let Ok(pass) = std::env::var("PASS") {
        raw.pass = pass;
    }

    let url: Url = raw.url.parse().map_err(|_| ConfigError::Validation {
        field: "URL".into(),
        reason: format!("not an absolute URL: {}", raw.url),
    })?;

    Ok(DeviceConfig {
        url,
        username: raw.user,
        password: SecretString::from(raw.pass),
    })
}

// ── Tests ───────────────────────────────────────────────────────────

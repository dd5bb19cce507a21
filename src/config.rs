//! Startup configuration, resolved once and passed explicitly.
//!
//! Precedence, highest first: command-line flags, the `API_BASE_URL`
//! environment variable (base URL only), the TOML config file, built-in
//! defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::client::endpoint_url;
use crate::error::InputError;
use crate::module::ValidationModule;

pub const DEFAULT_BASE_URL: &str = "https://jhove-rs.openpreservation.org/";
pub const BASE_URL_ENV: &str = "API_BASE_URL";
const APP_DIR: &str = "jhove-tui";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub module: Option<ValidationModule>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Values that outrank the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub module: Option<ValidationModule>,
    pub env_base_url: Option<String>,
}

impl Overrides {
    /// Pick up `API_BASE_URL` from the process environment.
    pub fn with_env(mut self) -> Self {
        self.env_base_url = std::env::var(BASE_URL_ENV).ok();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub default_module: ValidationModule,
    /// No timeout unless configured
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Config {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, InputError> {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        let base_url = non_empty(overrides.base_url)
            .or_else(|| non_empty(overrides.env_base_url))
            .or_else(|| non_empty(file.base_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        endpoint_url(&base_url)?;

        let default_module = overrides.module.or(file.module).unwrap_or_default();

        let request_timeout = file
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let log_file = file.log_file.unwrap_or_else(default_log_path);

        Ok(Self {
            base_url,
            default_module,
            request_timeout,
            log_file,
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("jhove-tui.log")
}

/// Load the config file.
///
/// An explicit path must exist; the default location is optional.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, InputError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(FileConfig::default()),
        },
    };

    let text = std::fs::read_to_string(&path).map_err(|source| InputError::Io {
        path: path.clone(),
        source,
    })?;
    parse_file_config(&path, &text)
}

pub fn parse_file_config(path: &Path, text: &str) -> Result<FileConfig, InputError> {
    toml::from_str(text).map_err(|e| InputError::ConfigFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

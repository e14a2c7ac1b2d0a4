//! Configuration management for namesilo-ddns.

use crate::error::{DdnsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-run settings taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// NameSilo API key.
    pub api_key: String,
    /// Domain whose records are rewritten (e.g. "example.com").
    pub domain: String,
}

impl Settings {
    /// Build settings, resolving `$VAR` references in the API key.
    pub fn new(api_key: &str, domain: &str) -> Result<Self> {
        let api_key = resolve_env(api_key);
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();

        if api_key.is_empty() {
            return Err(DdnsError::Config("API key is empty".to_string()));
        }
        if domain.is_empty() {
            return Err(DdnsError::Config("Domain is empty".to_string()));
        }

        Ok(Self { api_key, domain })
    }
}

/// Optional file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the NameSilo API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// IPv4 echo services, tried in order.
    #[serde(default = "default_ipv4_services")]
    pub ipv4_services: Vec<String>,

    /// IPv6 echo services, tried in order.
    #[serde(default = "default_ipv6_services")]
    pub ipv6_services: Vec<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://www.namesilo.com/api".to_string()
}

fn default_ipv4_services() -> Vec<String> {
    vec!["https://ipv4.icanhazip.com".to_string()]
}

fn default_ipv6_services() -> Vec<String> {
    vec!["https://ipv6.icanhazip.com".to_string()]
}

fn default_timeout() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            ipv4_services: default_ipv4_services(),
            ipv6_services: default_ipv6_services(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path, falling back to defaults
    /// when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(DdnsError::Config(format!(
                "api_base must be an http(s) URL, got {}",
                self.api_base
            )));
        }
        if self.ipv4_services.is_empty() {
            return Err(DdnsError::Config("ipv4_services is empty".to_string()));
        }
        if self.ipv6_services.is_empty() {
            return Err(DdnsError::Config("ipv6_services is empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(DdnsError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Pick the config file: the explicit path, else the first existing default
/// location, else the per-user default (which may not exist).
pub fn config_path(cli_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }

    let candidates = [
        dirs::config_dir().map(|p| p.join("namesilo-ddns/config.toml")),
        Some(PathBuf::from("/etc/namesilo-ddns/config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            return candidate;
        }
    }

    dirs::config_dir()
        .map(|p| p.join("namesilo-ddns/config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Resolve environment variable references (values starting with $).
pub(crate) fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_else(|_| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}

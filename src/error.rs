//! Error types for namesilo-ddns.

use thiserror::Error;

/// Result type alias for namesilo-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// IP detection error.
    #[error("IP detection failed: {0}")]
    IpDetection(String),

    /// The registrar answered with a non-success reply code.
    #[error("Registrar error in {operation} (code {code}): {detail}")]
    Registrar {
        operation: String,
        code: u32,
        detail: String,
    },

    /// One or more record updates failed while running with keep-going.
    #[error("{0} record update(s) failed")]
    UpdatesFailed(usize),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        // Strip the URL: it carries the API key as a query parameter.
        DdnsError::Network(e.without_url().to_string())
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Serialization(e.to_string())
    }
}

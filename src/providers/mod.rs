//! Registrar API clients and the DNS record model.

mod namesilo;

#[cfg(test)]
mod tests;

pub use namesilo::NameSiloProvider;

use crate::config::Settings;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::net::IpAddr;

/// DNS record type. Only A and AAAA are acted on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Other(String),
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            _ => RecordType::Other(s),
        }
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        RecordType::from(s.to_string())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::Aaaa => f.write_str("AAAA"),
            RecordType::Other(s) => f.write_str(s),
        }
    }
}

/// A DNS resource record as listed by the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    pub record_id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Fully qualified host name.
    pub host: String,
    pub value: String,
    #[serde(default = "default_ttl", deserialize_with = "lenient_u32")]
    pub ttl: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub distance: u32,
}

/// NameSilo's TTL when none is given.
fn default_ttl() -> u32 {
    7207
}

/// Result of a single record update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    /// Host that was updated.
    pub host: String,
    pub record_type: RecordType,
    /// Value on record before the update.
    pub previous_value: String,
    /// Value submitted.
    pub value: IpAddr,
    /// Record id assigned by the registrar after the update, if reported.
    pub record_id: Option<String>,
    /// Timestamp of the update.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Registrar API operations used by a run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Get the registrar name.
    fn name(&self) -> &'static str;

    /// List all DNS records of `settings.domain`.
    async fn list_records(&self, settings: &Settings) -> Result<Vec<DnsRecord>>;

    /// Replace the value of one record.
    async fn update_record(
        &self,
        settings: &Settings,
        record: &DnsRecord,
        value: IpAddr,
    ) -> Result<UpdateResult>;
}

/// Accepts a number either as a JSON number or as a numeric string.
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Num(u32),
        Str(String),
    }

    match Lenient::deserialize(deserializer)? {
        Lenient::Num(n) => Ok(n),
        Lenient::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A JSON field that holds either one item or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

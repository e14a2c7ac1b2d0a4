//! NameSilo registrar API client.

use super::{lenient_u32, DnsRecord, OneOrMany, Registrar, UpdateResult};
use crate::config::{Config, Settings};
use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.namesilo.com/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reply code NameSilo uses for a successful operation.
const REPLY_SUCCESS: u32 = 300;

/// NameSilo API client.
pub struct NameSiloProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<R> {
    reply: R,
}

#[derive(Debug, Deserialize)]
struct ListReply {
    #[serde(deserialize_with = "lenient_u32")]
    code: u32,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    resource_record: Option<OneOrMany<DnsRecord>>,
}

#[derive(Debug, Deserialize)]
struct UpdateReply {
    #[serde(deserialize_with = "lenient_u32")]
    code: u32,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    record_id: Option<String>,
}

impl NameSiloProvider {
    /// Create a new NameSilo client against the public API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), DEFAULT_TIMEOUT)
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.api_base.clone(), config.timeout())
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue one API operation and decode its reply.
    async fn call<R: DeserializeOwned>(
        &self,
        operation: &str,
        settings: &Settings,
        params: &[(&str, String)],
    ) -> Result<R> {
        let url = format!("{}/{}", self.base_url, operation);
        tracing::debug!("Calling {} for {}", operation, settings.domain);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("version", "1"),
                ("type", "json"),
                ("key", settings.api_key.as_str()),
                ("domain", settings.domain.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DdnsError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                operation
            )));
        }

        let text = response.text().await?;
        let envelope: Envelope<R> = serde_json::from_str(&text)?;
        Ok(envelope.reply)
    }
}

impl Default for NameSiloProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Fail unless the reply carries the success code.
fn check_reply(operation: &str, code: u32, detail: &str) -> Result<()> {
    if code == REPLY_SUCCESS {
        Ok(())
    } else {
        Err(DdnsError::Registrar {
            operation: operation.to_string(),
            code,
            detail: detail.to_string(),
        })
    }
}

/// Host relative to the domain, as `rrhost` expects it. Empty for the apex.
pub(crate) fn relative_host(host: &str, domain: &str) -> String {
    let host = host.trim_end_matches('.');

    if host.eq_ignore_ascii_case(domain) {
        return String::new();
    }

    let split = host.len().checked_sub(domain.len() + 1);
    match split {
        Some(at)
            if host.is_char_boundary(at)
                && host[at..].starts_with('.')
                && host[at + 1..].eq_ignore_ascii_case(domain) =>
        {
            host[..at].to_string()
        }
        _ => {
            tracing::warn!("Host {} is not under {}, sending it unchanged", host, domain);
            host.to_string()
        }
    }
}

#[async_trait]
impl Registrar for NameSiloProvider {
    fn name(&self) -> &'static str {
        "namesilo"
    }

    async fn list_records(&self, settings: &Settings) -> Result<Vec<DnsRecord>> {
        let reply: ListReply = self.call("dnsListRecords", settings, &[]).await?;
        check_reply("dnsListRecords", reply.code, &reply.detail)?;

        let records = reply
            .resource_record
            .map(OneOrMany::into_vec)
            .unwrap_or_default();

        tracing::info!("Listed {} record(s) for {}", records.len(), settings.domain);
        Ok(records)
    }

    async fn update_record(
        &self,
        settings: &Settings,
        record: &DnsRecord,
        value: IpAddr,
    ) -> Result<UpdateResult> {
        let params = [
            ("rrid", record.record_id.clone()),
            ("rrhost", relative_host(&record.host, &settings.domain)),
            ("rrvalue", value.to_string()),
            ("rrttl", record.ttl.to_string()),
        ];

        let reply: UpdateReply = self.call("dnsUpdateRecord", settings, &params).await?;
        check_reply("dnsUpdateRecord", reply.code, &reply.detail)?;

        Ok(UpdateResult {
            host: record.host.clone(),
            record_type: record.record_type.clone(),
            previous_value: record.value.clone(),
            value,
            record_id: reply.record_id,
            timestamp: chrono::Utc::now(),
        })
    }
}

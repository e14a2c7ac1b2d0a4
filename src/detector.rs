//! Public IP detection.

use crate::config::Config;
use crate::error::{DdnsError, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Current public addresses, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPair {
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
}

/// IP detector querying plaintext echo services.
pub struct IpDetector {
    client: reqwest::Client,
    ipv4_services: Vec<String>,
    ipv6_services: Vec<String>,
}

impl IpDetector {
    /// Create a new IP detector with the default icanhazip services.
    pub fn new() -> Self {
        let config = Config::default();
        Self::with_services(config.ipv4_services, config.ipv6_services, DEFAULT_TIMEOUT)
    }

    /// Create a detector from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_services(
            config.ipv4_services.clone(),
            config.ipv6_services.clone(),
            config.timeout(),
        )
    }

    /// Create a new IP detector with custom services.
    pub fn with_services(
        ipv4_services: Vec<String>,
        ipv6_services: Vec<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            ipv4_services,
            ipv6_services,
        }
    }

    /// Resolve both address families. Either failing aborts the lookup.
    pub async fn resolve(&self) -> Result<AddressPair> {
        let ipv4 = self.detect_ipv4().await?;
        let ipv6 = self.detect_ipv6().await?;
        tracing::info!("Resolved public addresses {} and {}", ipv4, ipv6);
        Ok(AddressPair { ipv4, ipv6 })
    }

    /// Detect public IPv4 address.
    pub async fn detect_ipv4(&self) -> Result<Ipv4Addr> {
        for service in &self.ipv4_services {
            match self.try_service(service).await {
                Ok(IpAddr::V4(ip)) => {
                    tracing::debug!("Detected IPv4 {} from {}", ip, service);
                    return Ok(ip);
                }
                Ok(IpAddr::V6(ip)) => {
                    tracing::warn!("Service {} returned IPv6 {} for an IPv4 lookup", service, ip);
                }
                Err(e) => {
                    tracing::warn!("Service {} failed: {}", service, e);
                }
            }
        }

        Err(DdnsError::IpDetection(
            "All IPv4 detection services failed".to_string(),
        ))
    }

    /// Detect public IPv6 address.
    pub async fn detect_ipv6(&self) -> Result<Ipv6Addr> {
        for service in &self.ipv6_services {
            match self.try_service(service).await {
                Ok(IpAddr::V6(ip)) => {
                    tracing::debug!("Detected IPv6 {} from {}", ip, service);
                    return Ok(ip);
                }
                Ok(IpAddr::V4(ip)) => {
                    tracing::warn!("Service {} returned IPv4 {} for an IPv6 lookup", service, ip);
                }
                Err(e) => {
                    tracing::warn!("IPv6 service {} failed: {}", service, e);
                }
            }
        }

        Err(DdnsError::IpDetection(
            "All IPv6 detection services failed".to_string(),
        ))
    }

    /// Try a single IP detection service.
    async fn try_service(&self, url: &str) -> Result<IpAddr> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DdnsError::IpDetection(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await?;
        let ip_str = text.trim();

        ip_str
            .parse()
            .map_err(|_| DdnsError::IpDetection(format!("Invalid IP response: {}", ip_str)))
    }
}

impl Default for IpDetector {
    fn default() -> Self {
        Self::new()
    }
}

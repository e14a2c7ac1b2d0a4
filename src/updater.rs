//! Record updating and the resolve → list → update run.

use crate::config::Settings;
use crate::detector::{AddressPair, IpDetector};
use crate::error::{DdnsError, Result};
use crate::providers::{DnsRecord, RecordType, Registrar, UpdateResult};
use std::net::IpAddr;

/// What to do when a single record update fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failed update.
    #[default]
    Abort,
    /// Log the failure, continue with the remaining records, and fail the
    /// run at the end.
    KeepGoing,
}

/// Options for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub policy: FailurePolicy,
    /// List records and report planned changes without updating.
    pub dry_run: bool,
}

/// The address a record should point at, or `None` if its type is not managed.
pub fn target_value(record: &DnsRecord, addresses: &AddressPair) -> Option<IpAddr> {
    match record.record_type {
        RecordType::A => Some(IpAddr::V4(addresses.ipv4)),
        RecordType::Aaaa => Some(IpAddr::V6(addresses.ipv6)),
        RecordType::Other(_) => None,
    }
}

/// Submit the resolved address for every A and AAAA record, one call at a
/// time. Values already current are submitted again.
pub async fn update_records(
    registrar: &dyn Registrar,
    settings: &Settings,
    records: &[DnsRecord],
    addresses: &AddressPair,
    policy: FailurePolicy,
) -> Result<Vec<UpdateResult>> {
    let mut results = Vec::new();
    let mut failures = 0;

    for record in records {
        let Some(value) = target_value(record, addresses) else {
            tracing::debug!(
                "Skipping {} record {} ({})",
                record.record_type,
                record.host,
                record.record_id
            );
            continue;
        };

        match registrar.update_record(settings, record, value).await {
            Ok(result) => {
                println!(
                    "DNS record {} of type {} updated to {}",
                    result.host, result.record_type, result.value
                );
                tracing::info!(
                    "{} {} {}: {} -> {}",
                    registrar.name(),
                    result.record_type,
                    result.host,
                    result.previous_value,
                    result.value
                );
                results.push(result);
            }
            Err(e) if policy == FailurePolicy::KeepGoing => {
                tracing::error!(
                    "Failed to update {} record {}: {}",
                    record.record_type,
                    record.host,
                    e
                );
                failures += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if failures > 0 {
        return Err(DdnsError::UpdatesFailed(failures));
    }

    Ok(results)
}

/// Resolve addresses, list the domain's records and update them.
///
/// Addresses are resolved before the registrar is contacted, so a failed
/// lookup leaves every record untouched.
pub async fn run(
    settings: &Settings,
    detector: &IpDetector,
    registrar: &dyn Registrar,
    options: RunOptions,
) -> Result<Vec<UpdateResult>> {
    let addresses = detector.resolve().await?;
    let records = registrar.list_records(settings).await?;

    if options.dry_run {
        for record in &records {
            if let Some(value) = target_value(record, &addresses) {
                println!(
                    "DNS record {} of type {} would be updated from {} to {}",
                    record.host, record.record_type, record.value, value
                );
            }
        }
        return Ok(Vec::new());
    }

    update_records(registrar, settings, &records, &addresses, options.policy).await
}

//! # namesilo-ddns
//!
//! A dynamic DNS updater for domains hosted at NameSilo, written in Rust.
//!
//! One run resolves the caller's public IPv4 and IPv6 addresses, lists the
//! domain's DNS records and rewrites every A record with the IPv4 address and
//! every AAAA record with the IPv6 address.
//!
//! ## Usage
//!
//! ```bash
//! # Update all A/AAAA records of example.com
//! namesilo-ddns --api_key "$NAMESILO_API_KEY" --domain example.com
//!
//! # Show what would change without touching anything
//! namesilo-ddns --api_key "$NAMESILO_API_KEY" --domain example.com --dry-run
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod providers;
pub mod updater;

pub use config::{Config, Settings};
pub use detector::{AddressPair, IpDetector};
pub use error::{DdnsError, Result};
pub use providers::{NameSiloProvider, Registrar};
pub use updater::{run, FailurePolicy, RunOptions};

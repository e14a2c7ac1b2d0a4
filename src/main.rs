//! namesilo-ddns - Dynamic DNS updater for NameSilo domains.

use clap::Parser;
use namesilo_ddns::config::{config_path, Config, Settings};
use namesilo_ddns::detector::IpDetector;
use namesilo_ddns::providers::NameSiloProvider;
use namesilo_ddns::updater::{run, FailurePolicy, RunOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "namesilo-ddns")]
#[command(about = "Point a NameSilo domain's A/AAAA records at this machine's public IPs")]
#[command(version)]
struct Cli {
    /// NameSilo API key (or $VAR to read it from the environment)
    #[arg(long = "api_key")]
    api_key: String,

    /// Domain name whose records are updated
    #[arg(long)]
    domain: String,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Continue with the remaining records when one update fails
    #[arg(long)]
    keep_going: bool,

    /// List records and show planned updates without applying them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_from(&config_path(cli.config))?;
    let settings = Settings::new(&cli.api_key, &cli.domain)?;

    let detector = IpDetector::from_config(&config);
    let registrar = NameSiloProvider::from_config(&config);

    let options = RunOptions {
        policy: if cli.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::Abort
        },
        dry_run: cli.dry_run,
    };

    let results = run(&settings, &detector, &registrar, options).await?;
    tracing::info!(
        "Finished {}: {} record(s) updated",
        settings.domain,
        results.len()
    );

    Ok(())
}

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use apexdns::config::Settings;
use apexdns::dns::{CloudflareProvider, DnsProvider};
use apexdns::ip;
use apexdns::notify::{DisabledNotifier, Notifier, TelegramNotifier};
use apexdns::reconcile::Reconciler;

/// Point the apex and wildcard A records of Cloudflare zones at the current
/// public IP. Configuration is read from the environment.
#[derive(Parser)]
#[command(name = "apexdns")]
#[command(version)]
struct Cli {
    /// Look records up and log what would change, without updating
    #[arg(long)]
    dry_run: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let settings = Settings::from_env()?;

    let current_ip = ip::get_external_ip(&settings.ip_echo_url).await?;
    info!("Current IP: {}", current_ip);

    let provider: Arc<dyn DnsProvider> =
        Arc::new(CloudflareProvider::new(settings.cloudflare.clone())?);

    let notifier: Arc<dyn Notifier> = match settings.telegram.clone() {
        Some(telegram) => Arc::new(TelegramNotifier::new(telegram)?),
        None => Arc::new(DisabledNotifier),
    };

    if cli.dry_run {
        info!("Dry-run mode: no records will be changed");
    }

    info!("Processing domains: {}", settings.domains.join(", "));

    let reconciler = Reconciler::new(provider, notifier).dry_run(cli.dry_run);
    let report = reconciler
        .reconcile_all(&current_ip, &settings.domains)
        .await;

    if report.has_failures() {
        bail!("One or more domains failed to update");
    }

    Ok(())
}

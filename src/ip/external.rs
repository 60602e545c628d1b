use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch the caller's public IP from a plain-text echo service.
///
/// The trimmed body is returned as-is. A body that is not an IP literal is
/// logged but not rejected.
pub async fn get_external_ip(url: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    fetch_ip(&client, url).await
}

async fn fetch_ip(client: &Client, url: &str) -> Result<String> {
    debug!("Querying current IP: GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to get current IP from {}", url))?
        .error_for_status()
        .with_context(|| format!("IP service {} returned an error", url))?
        .text()
        .await
        .context("Failed to read IP response")?;

    let ip = response.trim().to_string();
    if ip.parse::<IpAddr>().is_err() {
        warn!("IP service returned something that is not an IP address: {:?}", ip);
    }

    Ok(ip)
}

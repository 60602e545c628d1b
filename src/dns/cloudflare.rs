use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{Credentials, DnsProvider, DnsRecord};

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare API v4 client authenticated with an account email and
/// global API key.
pub struct CloudflareProvider {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Envelope wrapped around every v4 response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

#[derive(Debug, Serialize)]
struct UpdateRecordParams<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    content: &'a str,
    ttl: u32,
    proxied: bool,
}

impl CloudflareProvider {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, CLOUDFLARE_API_BASE)
    }

    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create Cloudflare API client")?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Auth-Email", &self.credentials.email)
            .header("X-Auth-Key", &self.credentials.api_key)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to Cloudflare API", action))?;

        read_envelope(response, action).await
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read Cloudflare {} response", action))?;

    // Error bodies usually still carry the envelope, which has the useful
    // messages; fall back to the raw body when it doesn't parse.
    let envelope = serde_json::from_str::<ApiResponse<T>>(&body);

    if !status.is_success() {
        let detail = match &envelope {
            Ok(envelope) if !envelope.errors.is_empty() => describe(&envelope.errors),
            _ => body,
        };
        return Err(status_error(status, action, &detail));
    }

    let envelope = envelope
        .with_context(|| format!("Failed to parse Cloudflare {} response", action))?;

    if !envelope.success {
        return Err(anyhow!(
            "Cloudflare {} failed: {}",
            action,
            describe(&envelope.errors)
        ));
    }

    envelope
        .result
        .ok_or_else(|| anyhow!("Cloudflare {} response has no result", action))
}

fn describe(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} ({})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

fn status_error(status: StatusCode, action: &str, detail: &str) -> anyhow::Error {
    match status.as_u16() {
        401 | 403 => anyhow!(
            "Cloudflare authentication failed during {} ({}): {}",
            action,
            status,
            detail
        ),
        429 => anyhow!("Cloudflare rate limit exceeded during {} ({})", action, status),
        500..=599 => anyhow!(
            "Cloudflare server error during {} ({}): {}",
            action,
            status,
            detail
        ),
        _ => anyhow!("Cloudflare API error during {} ({}): {}", action, status, detail),
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn zone_id(&self, domain: &str) -> Result<String> {
        let url = format!("{}/zones", self.base_url);
        let request = self.client.get(&url).query(&[("name", domain)]);

        let zones: Vec<Zone> = self.send(request, "zone lookup").await?;
        let zone = zones
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Zone could not be found for {}", domain))?;

        debug!("Found zone ID for {}: {}", domain, zone.id);
        Ok(zone.id)
    }

    async fn list_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        let request = self
            .client
            .get(&url)
            .query(&[("type", record_type), ("name", name)]);

        let records: Vec<DnsRecord> = self.send(request, "record listing").await?;
        debug!("Found {} {} record(s) named {}", records.len(), record_type, name);
        Ok(records)
    }

    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<()> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone_id, record.id
        );

        let payload = UpdateRecordParams {
            record_type: &record.record_type,
            name: &record.name,
            content: &record.content,
            ttl: record.ttl,
            proxied: record.proxied,
        };

        let request = self.client.put(&url).json(&payload);
        let _: serde_json::Value = self.send(request, "record update").await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

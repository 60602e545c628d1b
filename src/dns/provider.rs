use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

/// An existing DNS record as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
}

impl DnsRecord {
    /// Copy of this record pointing at `content`, everything else kept.
    pub fn with_content(&self, content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..self.clone()
        }
    }
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Look up the zone ID for an apex domain
    async fn zone_id(&self, domain: &str) -> Result<String>;

    /// List records in a zone with the given type and exact name
    async fn list_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>>;

    /// Replace an existing record, matched by its ID
    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<()>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

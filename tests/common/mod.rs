//! In-memory stand-ins for the DNS provider and the notifier.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use apexdns::dns::{DnsProvider, DnsRecord};
use apexdns::notify::Notifier;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ZoneId(String),
    List(String),
    Update(DnsRecord),
}

/// Provider backed by a map of zones and records that records every call.
#[derive(Default)]
pub struct FakeProvider {
    zones: HashMap<String, String>,
    records: Mutex<Vec<(String, DnsRecord)>>,
    failing_updates: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone for `domain` with an apex record (ttl 300, not proxied)
    /// and a wildcard record (ttl 120, proxied).
    pub fn with_domain(mut self, domain: &str, apex_ip: &str, wildcard_ip: &str) -> Self {
        let zone_id = format!("zone-{}", domain);
        self.zones.insert(domain.to_string(), zone_id.clone());

        let records = self.records.get_mut().unwrap();
        records.push((
            zone_id.clone(),
            record(&format!("{}-root", domain), domain, apex_ip, 300, false),
        ));
        records.push((
            zone_id,
            record(
                &format!("{}-wildcard", domain),
                &format!("*.{}", domain),
                wildcard_ip,
                120,
                true,
            ),
        ));
        self
    }

    pub fn without_record(mut self, name: &str) -> Self {
        self.records.get_mut().unwrap().retain(|(_, r)| r.name != name);
        self
    }

    pub fn failing_update(mut self, name: &str) -> Self {
        self.failing_updates.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<DnsRecord> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn listed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn content_of(&self, name: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(_, r)| r.name == name)
            .map(|(_, r)| r.content.clone())
    }
}

fn record(id: &str, name: &str, content: &str, ttl: u32, proxied: bool) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        record_type: "A".to_string(),
        name: name.to_string(),
        content: content.to_string(),
        ttl,
        proxied,
    }
}

#[async_trait]
impl DnsProvider for FakeProvider {
    async fn zone_id(&self, domain: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::ZoneId(domain.to_string()));

        self.zones
            .get(domain)
            .cloned()
            .ok_or_else(|| anyhow!("Zone could not be found for {}", domain))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        self.calls.lock().unwrap().push(Call::List(name.to_string()));

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(zone, r)| zone == zone_id && r.record_type == record_type && r.name == name)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(record.clone()));

        if self.failing_updates.contains(&record.name) {
            return Err(anyhow!("Cloudflare server error during record update (502)"));
        }

        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|(zone, r)| zone == zone_id && r.id == record.id)
            .ok_or_else(|| anyhow!("record {} does not exist", record.id))?;
        existing.1 = record.clone();

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Notifier that keeps every message it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

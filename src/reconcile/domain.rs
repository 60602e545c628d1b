use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use super::{DomainOutcome, ReconcileError, RecordKind};
use crate::dns::{DnsProvider, DnsRecord};
use crate::notify::Notifier;

const RECORD_TYPE: &str = "A";

/// Points the apex and wildcard A records of each domain at the current IP.
pub struct Reconciler {
    provider: Arc<dyn DnsProvider>,
    notifier: Arc<dyn Notifier>,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(provider: Arc<dyn DnsProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider,
            notifier,
            dry_run: false,
        }
    }

    /// Look records up and report differences without changing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub(super) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Reconcile the apex and wildcard records of one domain.
    ///
    /// The apex record is handled first. If looking it up or updating it
    /// fails, the wildcard record is left alone for this run.
    pub async fn reconcile_domain(
        &self,
        current_ip: &str,
        domain: &str,
    ) -> Result<DomainOutcome, ReconcileError> {
        let start = Instant::now();

        let zone_id = self
            .provider
            .zone_id(domain)
            .await
            .map_err(|source| ReconcileError::Zone {
                domain: domain.to_string(),
                source,
            })?;

        let root = self.find_record(&zone_id, domain, RecordKind::Root).await?;
        let wildcard = self
            .find_record(&zone_id, domain, RecordKind::Wildcard)
            .await?;

        let mut changed = Vec::new();
        for (kind, record) in [(RecordKind::Root, root), (RecordKind::Wildcard, wildcard)] {
            let name = kind.name(domain);
            if self.sync_record(&zone_id, &name, &record, current_ip).await? {
                changed.push(name);
            }
        }

        let elapsed = Duration::from_millis(start.elapsed().as_millis() as u64);
        info!("Finished {} in {:?}", domain, elapsed);

        if changed.is_empty() {
            Ok(DomainOutcome::UpToDate)
        } else {
            Ok(DomainOutcome::Updated { records: changed })
        }
    }

    async fn find_record(
        &self,
        zone_id: &str,
        domain: &str,
        kind: RecordKind,
    ) -> Result<DnsRecord, ReconcileError> {
        let name = kind.name(domain);

        let records = self
            .provider
            .list_records(zone_id, RECORD_TYPE, &name)
            .await
            .map_err(|source| ReconcileError::ListRecords {
                domain: domain.to_string(),
                kind,
                source,
            })?;

        records
            .into_iter()
            .next()
            .ok_or(ReconcileError::NotFound { name })
    }

    /// Returns whether the record was (or in dry-run mode would be) changed.
    async fn sync_record(
        &self,
        zone_id: &str,
        name: &str,
        record: &DnsRecord,
        current_ip: &str,
    ) -> Result<bool, ReconcileError> {
        if record.content == current_ip {
            info!("{} already up to date ({})", name, current_ip);
            return Ok(false);
        }

        if self.dry_run {
            info!(
                "[DRY-RUN] Would update {} from {} to {}",
                name, record.content, current_ip
            );
            return Ok(true);
        }

        info!("Updating {} from {} to {}", name, record.content, current_ip);

        self.provider
            .update_record(zone_id, &record.with_content(current_ip))
            .await
            .map_err(|source| ReconcileError::Update {
                name: name.to_string(),
                source,
            })?;

        self.notifier
            .notify(&format!("IP for {} updated to {}", name, current_ip))
            .await;

        Ok(true)
    }
}

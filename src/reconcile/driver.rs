use tracing::{error, info};

use super::{DomainOutcome, ReconcileError, Reconciler};

#[derive(Debug)]
pub struct DomainReport {
    pub domain: String,
    pub result: Result<DomainOutcome, ReconcileError>,
}

/// Per-domain results of one pass, in the order the domains were given.
#[derive(Debug, Default)]
pub struct RunReport {
    pub domains: Vec<DomainReport>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.domains.iter().any(|d| d.result.is_err())
    }

    pub fn failed(&self) -> usize {
        self.domains.iter().filter(|d| d.result.is_err()).count()
    }

    pub fn updated(&self) -> usize {
        self.domains
            .iter()
            .filter(|d| matches!(d.result, Ok(DomainOutcome::Updated { .. })))
            .count()
    }

    pub fn up_to_date(&self) -> usize {
        self.domains
            .iter()
            .filter(|d| matches!(d.result, Ok(DomainOutcome::UpToDate)))
            .count()
    }
}

impl Reconciler {
    /// Reconcile every domain in order. A failing domain is logged and
    /// reported through the notifier, and the pass moves on to the next.
    pub async fn reconcile_all(&self, current_ip: &str, domains: &[String]) -> RunReport {
        let mut report = RunReport::default();

        for domain in domains {
            let result = self.reconcile_domain(current_ip, domain).await;

            if let Err(e) = &result {
                error!("Error updating {}: {}", domain, e);
                self.notifier()
                    .notify(&format!("Error updating {}: {}", domain, e))
                    .await;
            }

            report.domains.push(DomainReport {
                domain: domain.clone(),
                result,
            });
        }

        info!(
            "Processed {} domain(s): {} updated, {} up to date, {} failed",
            report.domains.len(),
            report.updated(),
            report.up_to_date(),
            report.failed()
        );

        report
    }
}

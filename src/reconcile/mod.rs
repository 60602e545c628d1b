mod domain;
mod driver;

pub use domain::Reconciler;
pub use driver::{DomainReport, RunReport};

use std::fmt;

use thiserror::Error;

/// Which of the two managed records of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Root,
    Wildcard,
}

impl RecordKind {
    /// Record name for this kind under `apex`.
    pub fn name(self, apex: &str) -> String {
        match self {
            RecordKind::Root => apex.to_string(),
            RecordKind::Wildcard => format!("*.{}", apex),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Root => write!(f, "root"),
            RecordKind::Wildcard => write!(f, "wildcard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    /// Both records already point at the current IP.
    UpToDate,
    /// These records were changed (or would be, in dry-run mode).
    Updated { records: Vec<String> },
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to get zone ID for {domain}: {source:#}")]
    Zone {
        domain: String,
        source: anyhow::Error,
    },

    #[error("error listing {kind} record for {domain}: {source:#}")]
    ListRecords {
        domain: String,
        kind: RecordKind,
        source: anyhow::Error,
    },

    #[error("A record for {name} not found")]
    NotFound { name: String },

    #[error("failed updating {name}: {source:#}")]
    Update {
        name: String,
        source: anyhow::Error,
    },
}

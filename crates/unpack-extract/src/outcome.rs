use std::fmt;

use unpack_manifest::{ArchiveId, EntryName, TargetSet};

use crate::error::ExtractError;
use crate::extract::Written;

/// Terminal state of one archive.
#[derive(Debug)]
pub enum Outcome {
    AllSatisfied,
    /// The pass completed but these requested names never showed up.
    PartiallyMissing(Vec<EntryName>),
    Failed(ExtractError),
}

impl Outcome {
    /// Classify what is left of a target set after a complete pass.
    pub fn from_remaining(remaining: TargetSet) -> Self {
        if remaining.is_empty() {
            Self::AllSatisfied
        } else {
            Self::PartiallyMissing(remaining.into_iter().collect())
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::AllSatisfied)
    }

    /// The line to report for `archive`, if any.
    pub fn diagnostic(&self, archive: &str) -> Option<Diagnostic> {
        match self {
            Self::AllSatisfied => None,
            Self::PartiallyMissing(entries) => Some(Diagnostic::Missing {
                archive: archive.to_owned(),
                entries: entries.clone(),
            }),
            Self::Failed(err) => Some(Diagnostic::Error {
                archive: archive.to_owned(),
                message: err.to_string(),
            }),
        }
    }
}

/// One warning or error line attributed to a single archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Missing {
        archive: ArchiveId,
        entries: Vec<EntryName>,
    },
    Error {
        archive: ArchiveId,
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { archive, entries } => {
                write!(f, "WARN:{archive}:missing {}", entries.join(","))
            }
            Self::Error { archive, message } => write!(f, "ERROR:{archive}:{message}"),
        }
    }
}

/// Outcome of one archive together with what it wrote before ending.
#[derive(Debug)]
pub struct ArchiveSummary {
    pub outcome: Outcome,
    pub written: Written,
}

/// Totals over a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub archives: usize,
    pub satisfied: usize,
    pub partially_missing: usize,
    pub failed: usize,
    pub entries_written: usize,
    pub bytes_written: u64,
}

impl RunReport {
    pub(crate) fn record(&mut self, summary: &ArchiveSummary) {
        self.archives += 1;
        match summary.outcome {
            Outcome::AllSatisfied => self.satisfied += 1,
            Outcome::PartiallyMissing(_) => self.partially_missing += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
        self.entries_written += summary.written.entries;
        self.bytes_written += summary.written.bytes;
    }

    /// Whether any archive ended with a warning or an error.
    pub fn has_problems(&self) -> bool {
        self.partially_missing > 0 || self.failed > 0
    }
}

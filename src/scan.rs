//! Ownership scan: a single forward pass over the walked entries.
//!
//! Every visited entry is reported; entries owned by the source identity also
//! get a remediation hint naming the target account. Nothing is ever chowned.

use crate::error::{AccessError, ScanError};
use crate::identity::{Identity, IdentityResolver};
use crate::report::Reporter;
use crate::tree::entry::FilesystemEntry;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to do when an entry cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first unreadable entry
    #[default]
    Abort,
    /// Log the error, remember it, and keep walking
    Skip,
}

/// Outcome of a completed scan
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub visited: usize,
    pub matched: usize,
    pub skipped: Vec<AccessError>,
    pub last_path: Option<PathBuf>,
}

/// Source and target identities of a migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Account whose files are flagged
    pub source: Identity,
    /// Account named in the remediation hint
    pub target: Identity,
}

impl Migration {
    /// Resolve both accounts before any entry is read.
    ///
    /// `target` defaults to `source` when not given.
    pub fn resolve<R: IdentityResolver + ?Sized>(
        resolver: &R,
        source: &str,
        target: Option<&str>,
    ) -> Result<Self, ScanError> {
        let source = resolver.resolve(source)?;
        let target = match target {
            Some(account) => resolver.resolve(account)?,
            None => source.clone(),
        };
        if source == target {
            debug!(%source, %target, "Source and target share a uid");
        }
        Ok(Self { source, target })
    }
}

/// Joins entries, the migration and the reporter under an error policy
pub struct Scanner {
    migration: Migration,
    policy: ErrorPolicy,
}

impl Scanner {
    pub fn new(migration: Migration, policy: ErrorPolicy) -> Self {
        Self { migration, policy }
    }

    pub fn migration(&self) -> &Migration {
        &self.migration
    }

    /// Run the scan over `entries`, writing to `reporter`.
    ///
    /// Under [`ErrorPolicy::Abort`] the output written so far is flushed before the
    /// error is returned.
    pub fn run<I, W>(&self, entries: I, reporter: &mut Reporter<W>) -> Result<ScanSummary, ScanError>
    where
        I: IntoIterator<Item = Result<FilesystemEntry, AccessError>>,
        W: Write,
    {
        let mut summary = ScanSummary::default();

        for item in entries {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => match self.policy {
                    ErrorPolicy::Abort => {
                        reporter.flush()?;
                        return Err(ScanError::Aborted {
                            source: err,
                            last_path: summary.last_path,
                            visited: summary.visited,
                        });
                    }
                    ErrorPolicy::Skip => {
                        warn!(path = %err.path().display(), error = %err, "Skipping unreadable entry");
                        summary.skipped.push(err);
                        continue;
                    }
                },
            };

            let needs_chown = self.migration.source.owns(entry.uid);
            reporter.entry(&entry, needs_chown.then_some(&self.migration.target))?;

            summary.visited += 1;
            if needs_chown {
                summary.matched += 1;
            }
            summary.last_path = Some(entry.path);
        }

        reporter.flush()?;
        info!(
            visited = summary.visited,
            matched = summary.matched,
            skipped = summary.skipped.len(),
            "Scan complete"
        );
        Ok(summary)
    }
}

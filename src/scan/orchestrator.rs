// file: src/scan/orchestrator.rs
// description: sequential repository scanning and sub-folder name aggregation
// reference: one repository at a time, failures skip the repository

use crate::error::{Result, ScanError};
use crate::scan::progress::{ScanProgress, ScanStats};
use crate::search::{ContentEntry, DirectoryLister, collect_subfolder_names, locate_sequence};
use crate::utils::Validator;
use crate::utils::logging::{format_step, format_warning};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepoOutcome {
    Matched {
        path: String,
        subfolders: BTreeSet<String>,
    },
    NotMatched,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoScan {
    pub repository: String,
    pub outcome: RepoOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub repositories: Vec<RepoScan>,

    /// Unique sub-folder names across every matched repository
    pub subfolders: BTreeSet<String>,

    pub stats: ScanStats,
}

impl ScanReport {
    pub fn record(&mut self, scan: RepoScan) {
        if let RepoOutcome::Matched { subfolders, .. } = &scan.outcome {
            self.subfolders.extend(subfolders.iter().cloned());
        }
        self.repositories.push(scan);
    }

    pub fn matched(&self) -> impl Iterator<Item = &RepoScan> {
        self.repositories
            .iter()
            .filter(|scan| matches!(scan.outcome, RepoOutcome::Matched { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &RepoScan> {
        self.repositories
            .iter()
            .filter(|scan| matches!(scan.outcome, RepoOutcome::Failed { .. }))
    }
}

pub struct ScanOrchestrator {
    segments: Vec<String>,
}

impl ScanOrchestrator {
    pub fn new(segments: Vec<String>) -> Result<Self> {
        Validator::validate_segments(&segments)?;
        Ok(Self { segments })
    }

    pub fn sequence_label(&self) -> String {
        self.segments.join("/")
    }

    /// Scans one repository: checks the root is readable, locates the
    /// sequence, then collects the sub-folders of the matched path.
    pub async fn scan_repository<L: DirectoryLister>(
        &self,
        lister: &L,
        repository: &str,
    ) -> RepoOutcome {
        let root = match lister.list_directory("").await {
            Ok(entries) => entries,
            Err(ScanError::NotFound { .. }) => {
                debug!("{} has no readable root (empty repository)", repository);
                return RepoOutcome::NotMatched;
            }
            Err(e) => {
                return RepoOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let lister = PrefetchedRoot {
            inner: lister,
            root,
        };

        let Some(path) = locate_sequence(&lister, &self.segments).await else {
            debug!("'{}' not found in {}", self.sequence_label(), repository);
            return RepoOutcome::NotMatched;
        };

        info!(
            "Found '{}' in {} at path: '{}'",
            self.sequence_label(),
            repository,
            path
        );

        match collect_subfolder_names(&lister, &path).await {
            Ok(subfolders) => {
                if subfolders.is_empty() {
                    warn!("'{}' in {} contains no subdirectories", path, repository);
                }
                RepoOutcome::Matched { path, subfolders }
            }
            Err(ScanError::NotFound { .. }) => RepoOutcome::Failed {
                reason: format!("path '{}' found by search no longer exists", path),
            },
            Err(e) => RepoOutcome::Failed {
                reason: format!("could not list '{}': {}", path, e),
            },
        }
    }

    /// Scans `repositories` in order, one at a time, using `lister_for` to
    /// obtain the listing capability of each repository.
    pub async fn scan_all<L, F>(
        &self,
        repositories: &[String],
        lister_for: F,
        progress: &ScanProgress,
    ) -> ScanReport
    where
        L: DirectoryLister,
        F: Fn(&str) -> L,
    {
        let total = repositories.len();
        let mut report = ScanReport::default();

        for (index, repository) in repositories.iter().enumerate() {
            progress.start_repository(repository);
            progress.println(format_step(
                index + 1,
                total,
                &format!("Processing repo: {}", repository),
            ));

            let lister = lister_for(repository);
            let outcome = self.scan_repository(&lister, repository).await;

            match &outcome {
                RepoOutcome::Matched { .. } => progress.inc_matched(),
                RepoOutcome::NotMatched => progress.inc_not_matched(),
                RepoOutcome::Failed { reason } => {
                    progress.println(format_warning(&format!(
                        "Skipping repo {}: {}",
                        repository, reason
                    )));
                    progress.inc_failed();
                }
            }

            report.record(RepoScan {
                repository: repository.clone(),
                outcome,
            });
        }

        progress.finish();
        report.stats = progress.get_stats();
        report
    }
}

/// Serves the root listing fetched by the accessibility check so the search
/// does not request it a second time.
struct PrefetchedRoot<'a, L> {
    inner: &'a L,
    root: Vec<ContentEntry>,
}

impl<L: DirectoryLister> DirectoryLister for PrefetchedRoot<'_, L> {
    async fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>> {
        if path.trim_matches('/').is_empty() {
            return Ok(self.root.clone());
        }
        self.inner.list_directory(path).await
    }
}

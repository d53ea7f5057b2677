//! # Sync Orchestration
//!
//! `DocSync` drives a whole run: it makes sure the steering directory exists,
//! then for every doc source, in configuration order,
//!
//! 1.  fetches a shallow [`Snapshot`](crate::repository::Snapshot),
//! 2.  resolves and copies the source's patterns from it,
//! 3.  releases the snapshot,
//!
//! and finally folds the per-source outcomes into a [`SyncReport`].
//!
//! The run is best-effort. A source that cannot be fetched contributes one
//! error and the next source is processed as usual; pattern and copy
//! failures are collected the same way. Only a steering directory that
//! cannot be created stops the run before any fetch.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{DocSource, SyncConfig};
use crate::copier::{resolve_and_copy, OverwritePolicy, SyncOutcome};
use crate::defaults;
use crate::prompt::Confirm;
use crate::repository::RepositoryFetcher;

/// Final result of a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// `true` iff no errors were recorded.
    pub success: bool,
    /// One-line summary.
    pub message: String,
    /// Synced patterns across all sources, in order.
    pub synced: Vec<String>,
    /// `None` when there were no errors.
    pub errors: Option<Vec<String>>,
}

impl SyncReport {
    fn completed(outcome: SyncOutcome) -> Self {
        let mut message = format!("Sync completed. {} files synced", outcome.synced.len());
        if !outcome.errors.is_empty() {
            message.push_str(&format!(", {} errors", outcome.errors.len()));
        }

        Self {
            success: outcome.errors.is_empty(),
            message,
            synced: outcome.synced,
            errors: if outcome.errors.is_empty() {
                None
            } else {
                Some(outcome.errors)
            },
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            success: false,
            message: format!("Sync failed: {}", reason),
            synced: Vec::new(),
            errors: Some(vec![reason]),
        }
    }

    /// Errors as a slice, empty when there were none.
    pub fn error_list(&self) -> &[String] {
        self.errors.as_deref().unwrap_or(&[])
    }
}

/// Syncs configured doc sources into a project's steering directory.
pub struct DocSync {
    steering_dir: PathBuf,
    interactive: bool,
    fetcher: RepositoryFetcher,
}

impl DocSync {
    /// A sync for `project_root` using the system `git`.
    pub fn new(project_root: &Path, interactive: bool) -> Self {
        Self::with_fetcher(project_root, interactive, RepositoryFetcher::new())
    }

    /// A sync using a custom fetcher (e.g. one backed by fake git operations).
    pub fn with_fetcher(project_root: &Path, interactive: bool, fetcher: RepositoryFetcher) -> Self {
        Self {
            steering_dir: defaults::steering_dir(project_root),
            interactive,
            fetcher,
        }
    }

    /// Directory every synced file is written to.
    pub fn steering_dir(&self) -> &Path {
        &self.steering_dir
    }

    /// Run the sync for every doc source in `config`.
    ///
    /// `prompt` is only asked when `sync_override` is off and the sync is
    /// interactive.
    pub fn sync(&self, config: &SyncConfig, prompt: &mut dyn Confirm) -> SyncReport {
        if let Err(e) = self.ensure_steering_dir() {
            return SyncReport::failed(e.to_string());
        }

        let policy = OverwritePolicy::from_flags(config.sync_override(), self.interactive);
        let mut total = SyncOutcome::default();

        for source in &config.docs {
            total.extend(self.sync_source(source, policy, prompt));
        }

        SyncReport::completed(total)
    }

    fn sync_source(
        &self,
        source: &DocSource,
        policy: OverwritePolicy,
        prompt: &mut dyn Confirm,
    ) -> SyncOutcome {
        let snapshot = match self.fetcher.fetch(source) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("✗ Git sync failed for {}: {}", source.git, e);
                return SyncOutcome {
                    errors: vec![format!("Git sync failed for {}: {}", source.git, e)],
                    ..SyncOutcome::default()
                };
            }
        };

        let outcome = resolve_and_copy(
            snapshot.path(),
            &source.steering,
            &self.steering_dir,
            policy,
            prompt,
        );

        if let Err(e) = snapshot.release() {
            warn!("Failed to remove snapshot of {}: {}", source.git, e);
        }

        outcome
    }

    fn ensure_steering_dir(&self) -> std::io::Result<()> {
        if !self.steering_dir.is_dir() {
            fs::create_dir_all(&self.steering_dir)?;
            info!("Created directory: {}", self.steering_dir.display());
        }
        Ok(())
    }
}

//! # Selective Copy
//!
//! Copies the files a list of patterns resolves to into a single flat
//! destination directory. Every file lands under its base name only, so
//! `docs/api/a.md` and `docs/guide/a.md` both target `<dest>/a.md`; the one
//! processed last wins.
//!
//! ## Overwrite policy
//!
//! When the destination file already exists, [`OverwritePolicy`] decides:
//!
//! | Policy      | Existing destination                         |
//! |-------------|----------------------------------------------|
//! | `Overwrite` | replaced                                     |
//! | `Skip`      | left alone, not an error                     |
//! | `Ask`       | replaced only if the operator confirms       |
//!
//! ## Failure scope
//!
//! Each pattern is handled on its own and yields a [`PatternOutcome`]. A
//! pattern that cannot be resolved, or a file that cannot be copied, adds an
//! error to that outcome and processing moves on. Outcomes are folded into a
//! [`SyncOutcome`], the per-source report.

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::error::Error;
use crate::pattern;
use crate::prompt::Confirm;

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Overwrite,
    Skip,
    Ask,
}

impl OverwritePolicy {
    /// Policy for the configured override flag and the CLI interactive flag.
    ///
    /// `sync_override` wins: interactive mode only matters when overwriting
    /// is otherwise forbidden.
    pub fn from_flags(sync_override: bool, interactive: bool) -> Self {
        match (sync_override, interactive) {
            (true, _) => OverwritePolicy::Overwrite,
            (false, true) => OverwritePolicy::Ask,
            (false, false) => OverwritePolicy::Skip,
        }
    }
}

/// Result of processing a single pattern.
#[derive(Debug)]
pub struct PatternOutcome {
    pub pattern: String,
    /// Files written to the destination.
    pub copied: usize,
    /// Files left alone because the destination already existed.
    pub skipped: usize,
    pub errors: Vec<Error>,
}

impl PatternOutcome {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            copied: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    /// A pattern counts as synced once at least one of its files was copied.
    pub fn is_synced(&self) -> bool {
        self.copied > 0
    }

    /// Errors rendered for the report.
    ///
    /// Resolution failures read on their own ("No files matching: ...");
    /// everything else is prefixed with the pattern it happened under.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| match e {
                Error::PatternNotFound { .. }
                | Error::NoMatches { .. }
                | Error::PatternOutsideRepository { .. } => e.to_string(),
                _ => format!("Error syncing {}: {}", self.pattern, e),
            })
            .collect()
    }
}

/// Accumulated result for one doc source (or, once merged, for a whole run).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Patterns that copied at least one file, in processing order.
    pub synced: Vec<String>,
    pub errors: Vec<String>,
    /// Total files written.
    pub files_copied: usize,
}

impl SyncOutcome {
    /// Fold one pattern's outcome in.
    pub fn record(&mut self, outcome: PatternOutcome) {
        self.errors.extend(outcome.error_messages());
        self.files_copied += outcome.copied;
        if outcome.is_synced() {
            self.synced.push(outcome.pattern);
        }
    }

    /// Append another outcome, preserving order.
    pub fn extend(&mut self, other: SyncOutcome) {
        self.synced.extend(other.synced);
        self.errors.extend(other.errors);
        self.files_copied += other.files_copied;
    }
}

enum FileAction {
    Copied,
    Skipped,
}

/// Copies resolved files from a snapshot into `dest_dir`.
pub struct SelectiveCopier<'a, 'p> {
    dest_dir: &'a Path,
    policy: OverwritePolicy,
    prompt: &'p mut dyn Confirm,
}

impl<'a, 'p> SelectiveCopier<'a, 'p> {
    /// `prompt` is consulted only under [`OverwritePolicy::Ask`].
    pub fn new(dest_dir: &'a Path, policy: OverwritePolicy, prompt: &'p mut dyn Confirm) -> Self {
        Self {
            dest_dir,
            policy,
            prompt,
        }
    }

    /// Resolve and copy every pattern, in order.
    pub fn copy_patterns(&mut self, snapshot_root: &Path, patterns: &[String]) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        for pattern in patterns {
            outcome.record(self.copy_pattern(snapshot_root, pattern));
        }
        outcome
    }

    /// Resolve one pattern and copy each file it selects.
    pub fn copy_pattern(&mut self, snapshot_root: &Path, pattern: &str) -> PatternOutcome {
        let mut outcome = PatternOutcome::new(pattern);

        let resolution = match pattern::resolve(snapshot_root, pattern) {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("✗ {}", e);
                outcome.errors.push(e);
                return outcome;
            }
        };
        outcome.errors.extend(resolution.errors);

        for src in &resolution.files {
            match self.copy_file(src) {
                Ok(FileAction::Copied) => outcome.copied += 1,
                Ok(FileAction::Skipped) => outcome.skipped += 1,
                Err(e) => {
                    warn!("✗ Error syncing {}: {}", pattern, e);
                    outcome.errors.push(e);
                }
            }
        }

        if outcome.is_synced() {
            info!("✓ Synced: {} ({} file(s))", pattern, outcome.copied);
        } else if outcome.skipped > 0 {
            info!("⊘ Skipped (exists): {}", pattern);
        }

        outcome
    }

    fn copy_file(&mut self, src: &Path) -> Result<FileAction, Error> {
        let file_name = src.file_name().ok_or_else(|| Error::Copy {
            src: src.to_path_buf(),
            dst: self.dest_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        })?;
        let dst = self.dest_dir.join(file_name);

        if dst.exists() && !self.may_overwrite(&dst)? {
            return Ok(FileAction::Skipped);
        }

        write_copy(src, &dst)?;
        Ok(FileAction::Copied)
    }

    fn may_overwrite(&mut self, dst: &Path) -> Result<bool, Error> {
        match self.policy {
            OverwritePolicy::Overwrite => Ok(true),
            OverwritePolicy::Skip => Ok(false),
            OverwritePolicy::Ask => {
                let name = dst
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.prompt
                    .confirm(&format!("File already exists: {}. Overwrite?", name))
                    .map_err(Error::Io)
            }
        }
    }
}

/// Byte-for-byte copy, creating the destination's parent if needed.
fn write_copy(src: &Path, dst: &Path) -> Result<(), Error> {
    let copy_err = |source: io::Error| Error::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    let content = fs::read(src).map_err(copy_err)?;
    fs::write(dst, content).map_err(copy_err)?;
    Ok(())
}

/// Resolve `patterns` against `snapshot_root` and copy into `dest_dir`.
pub fn resolve_and_copy(
    snapshot_root: &Path,
    patterns: &[String],
    dest_dir: &Path,
    policy: OverwritePolicy,
    prompt: &mut dyn Confirm,
) -> SyncOutcome {
    SelectiveCopier::new(dest_dir, policy, prompt).copy_patterns(snapshot_root, patterns)
}

//! # Repository Fetching
//!
//! This module provides the `RepositoryFetcher`, which turns a configured
//! [`DocSource`] into a [`Snapshot`]: a shallow checkout in a private
//! temporary directory that lives exactly as long as one source is being
//! processed.
//!
//! ## Design
//!
//! Git access goes through the **`GitOperations`** trait. In the main
//! application `DefaultGitOperations` wraps the system `git` command; tests
//! substitute an implementation that copies a fixture tree so the sync engine
//! can be exercised without network access.
//!
//! A `Snapshot` owns its `tempfile::TempDir`. Calling [`Snapshot::release`]
//! removes the tree and reports any failure; dropping the snapshot without
//! releasing it (early return, panic) still removes the tree.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::DocSource;
use crate::defaults::SNAPSHOT_DIR_PREFIX;
use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Clones `url` into `target_dir` with a depth of one.
    ///
    /// `ref_name` is a branch or tag; `None` means the remote default branch.
    /// `target_dir` does not exist yet, but its parent does.
    fn clone_shallow(&self, url: &str, ref_name: Option<&str>, target_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_shallow(&self, url: &str, ref_name: Option<&str>, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, ref_name, target_dir)
    }
}

/// A shallow checkout of one doc source.
#[derive(Debug)]
pub struct Snapshot {
    temp_dir: tempfile::TempDir,
    root: PathBuf,
}

impl Snapshot {
    /// Root of the checked-out tree. Patterns are resolved against this.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Removes the temporary tree.
    pub fn release(self) -> Result<()> {
        let dir = self.temp_dir.path().to_path_buf();
        self.temp_dir.close()?;
        debug!("Released snapshot {}", dir.display());
        Ok(())
    }
}

/// Produces one [`Snapshot`] per doc source.
pub struct RepositoryFetcher {
    git_ops: Box<dyn GitOperations>,
    temp_root: Option<PathBuf>,
}

impl RepositoryFetcher {
    /// Creates a fetcher backed by the system `git` command, placing
    /// snapshots under the OS temp directory.
    pub fn new() -> Self {
        Self::with_operations(Box::new(DefaultGitOperations))
    }

    /// Creates a fetcher with a custom `GitOperations` implementation.
    pub fn with_operations(git_ops: Box<dyn GitOperations>) -> Self {
        Self {
            git_ops,
            temp_root: None,
        }
    }

    /// Places snapshots under `temp_root` instead of the OS temp directory.
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(temp_root.into());
        self
    }

    /// Clones `source` into a fresh temporary directory.
    ///
    /// On failure, any partially written directory is removed before the
    /// error is returned.
    pub fn fetch(&self, source: &DocSource) -> Result<Snapshot> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SNAPSHOT_DIR_PREFIX);
        let temp_dir = match &self.temp_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        let root = temp_dir.path().join("repo");
        debug!("Snapshot for {} at {}", source.git, root.display());

        if let Err(e) = self
            .git_ops
            .clone_shallow(&source.git, source.checkout_ref(), &root)
        {
            if let Err(cleanup) = temp_dir.close() {
                warn!("Failed to remove partial clone of {}: {}", source.git, cleanup);
            }
            return Err(e);
        }

        Ok(Snapshot { temp_dir, root })
    }
}

impl Default for RepositoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}

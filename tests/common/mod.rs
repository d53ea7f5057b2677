//! Shared test utilities for integration and E2E tests.
//!
//! This module provides fixture repositories, a fake `GitOperations`, and
//! config builders to reduce duplication across test files.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let upstream = SourceTree::new().with_file("docs/a.md", "a");
//!     // ... test code
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use kiro_doc_sync::error::{Error, Result};
use kiro_doc_sync::repository::GitOperations;

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::{config_json, git_available, FakeGit, GitRepoFixture, SourceTree};
}

/// A plain directory tree standing in for a repository checkout.
pub struct SourceTree {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl SourceTree {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file, creating parent directories as needed.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let full = self.temp_dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).expect("Failed to create parent");
        fs::write(full, content).expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// `GitOperations` that "clones" by copying a registered [`SourceTree`].
///
/// Unregistered URLs fail like an unreachable remote would. Every clone is
/// recorded as `(url, ref)`.
#[derive(Default)]
pub struct FakeGit {
    trees: HashMap<String, PathBuf>,
    pub calls: std::rc::Rc<std::cell::RefCell<Vec<(String, Option<String>)>>>,
}

#[allow(dead_code)]
impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, url: &str, tree: &SourceTree) -> Self {
        self.trees.insert(url.to_string(), tree.path().to_path_buf());
        self
    }
}

impl GitOperations for FakeGit {
    fn clone_shallow(&self, url: &str, ref_name: Option<&str>, target_dir: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), ref_name.map(str::to_string)));

        let Some(source) = self.trees.get(url) else {
            return Err(Error::GitClone {
                url: url.to_string(),
                r#ref: ref_name.unwrap_or("HEAD").to_string(),
                message: format!("fatal: repository '{}' does not exist", url),
                hint: None,
            });
        };

        for entry in walkdir::WalkDir::new(source) {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            let relative = entry.path().strip_prefix(source).unwrap();
            let dest = target_dir.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest)?;
            } else {
                fs::copy(entry.path(), &dest)?;
            }
        }
        Ok(())
    }
}

/// Check whether a usable `git` binary is on PATH.
///
/// Tests that build real repositories return early when it is not.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A real local git repository, cloneable through a `file://` URL.
#[allow(dead_code)]
pub struct GitRepoFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitRepoFixture {
    /// An empty repository on branch `main`.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.git(&["init", "-q"]);
        fixture.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        fixture
    }

    /// Write files and commit them.
    pub fn commit(&self, files: &[(&str, &str)], message: &str) -> &Self {
        for (path, content) in files {
            let full = self.temp_dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).expect("Failed to create parent");
            fs::write(full, content).expect("Failed to write file");
        }
        self.git(&["add", "-A"]);
        self.git(&[
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "-m",
            message,
        ]);
        self
    }

    pub fn tag(&self, name: &str) -> &Self {
        self.git(&["tag", name]);
        self
    }

    pub fn branch(&self, name: &str) -> &Self {
        self.git(&["checkout", "-q", "-b", name]);
        self
    }

    pub fn checkout(&self, name: &str) -> &Self {
        self.git(&["checkout", "-q", name]);
        self
    }

    /// `file://` URL, which makes git honour `--depth` for local clones.
    pub fn url(&self) -> String {
        format!("file://{}", self.temp_dir.path().display())
    }

    fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Build a config document.
///
/// Each source is `(git, branch, tag, steering)`.
#[allow(dead_code)]
pub fn config_json(
    sync_override: bool,
    sources: &[(&str, Option<&str>, Option<&str>, &[&str])],
) -> String {
    let docs: Vec<serde_json::Value> = sources
        .iter()
        .map(|(git, branch, tag, steering)| {
            let mut doc = serde_json::json!({ "git": git, "steering": steering });
            if let Some(branch) = branch {
                doc["branch"] = serde_json::json!(branch);
            }
            if let Some(tag) = tag {
                doc["tag"] = serde_json::json!(tag);
            }
            doc
        })
        .collect();

    serde_json::json!({
        "general": { "files": { "sync_override": sync_override } },
        "docs": docs,
    })
    .to_string()
}

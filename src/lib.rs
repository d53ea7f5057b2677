//! # Kiro Doc Sync Library
//!
//! This library pulls selected documentation files out of remote Git
//! repositories and drops them into a project's `.kiro/steering` directory.
//! It is used by the `kiro-doc-sync` command-line tool but can be driven
//! directly as well.
//!
//! ## Quick Example
//!
//! ```
//! use kiro_doc_sync::config;
//!
//! let cfg = config::parse(r#"{
//!     "general": { "files": { "sync_override": false } },
//!     "docs": [
//!         { "git": "https://github.com/org/standards.git",
//!           "tag": "v1.2.0",
//!           "steering": ["docs/style.md", "rules", "guides/*.md"] }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(cfg.docs[0].checkout_ref(), Some("v1.2.0"));
//! assert!(!cfg.sync_override());
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the JSON document listing doc sources and
//!   the overwrite flag.
//! - **Repository fetching (`repository`, `git`)**: shallow clones into
//!   short-lived temporary snapshots.
//! - **Patterns (`pattern`)**: classify a steering entry as a file, a
//!   directory or a glob and resolve it to concrete files.
//! - **Selective copy (`copier`)**: copy resolved files flat into the
//!   steering directory under an overwrite policy.
//! - **Confirmation (`prompt`)**: the yes/no question asked in interactive
//!   mode.
//! - **Orchestration (`sync`)**: runs every source in order and builds the
//!   final report.
//!
//! ## Execution Flow
//!
//! For each doc source, in configuration order:
//!
//! 1.  **Fetch**: shallow-clone the repository at its tag, branch or default
//!     branch into a private temporary directory.
//! 2.  **Resolve and copy**: process each pattern in order, collecting
//!     per-pattern errors instead of stopping.
//! 3.  **Release**: delete the temporary directory.
//!
//! The outcomes are concatenated into a [`sync::SyncReport`] whose `success`
//! flag is true only when no error was recorded anywhere.

pub mod config;
pub mod copier;
pub mod defaults;
pub mod error;
pub mod git;
pub mod output;
pub mod pattern;
pub mod prompt;
pub mod repository;
pub mod sync;

#[cfg(test)]
mod pattern_proptest;

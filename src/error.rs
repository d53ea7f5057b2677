//! # Error Handling
//!
//! This module defines the centralized error type for `kiro-doc-sync`. It uses
//! the `thiserror` library to build an `Error` enum covering every failure the
//! library can report, each with enough context to be shown to an operator
//! as-is.
//!
//! ## Scopes
//!
//! Errors fall into four scopes, and the scope decides how far a failure
//! reaches:
//!
//! - **Configuration** (`ConfigNotFound`, `ConfigParse`, `ConfigInvalid`):
//!   fatal before any repository is fetched.
//! - **Fetch** (`GitClone`): fatal for one doc source only. The remaining
//!   sources are still processed.
//! - **Pattern resolution** (`PatternNotFound`, `NoMatches`,
//!   `PatternOutsideRepository`, `Walk`, `Glob`): scoped to one pattern.
//! - **Copy** (`Copy`): scoped to one resolved file.
//!
//! Pattern and copy errors are never propagated with `?` past the copier; they
//! are rendered to strings and collected into the sync report.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for kiro-doc-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist.
    #[error("Config file not found: {}\n  hint: Use -c/--config to point at a different file, or create kiro-doc-sync.cfg.json in the project root", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file is not valid JSON or does not match the schema.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The configuration parsed but failed validation.
    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// An error occurred while cloning a Git repository.
    ///
    /// `r#ref` is the requested tag or branch, or `HEAD` when the remote
    /// default branch was requested.
    #[error("Git clone error for {url}@{r#ref}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A non-glob pattern does not exist in the snapshot.
    #[error("File not found in repo: {pattern}")]
    PatternNotFound { pattern: String },

    /// A glob pattern matched no files.
    #[error("No files matching: {pattern}")]
    NoMatches { pattern: String },

    /// A pattern is absolute or climbs out of the snapshot with `..`.
    #[error("Pattern escapes the repository: {pattern}")]
    PatternOutsideRepository { pattern: String },

    /// Listing a directory (or expanding a glob) failed part-way.
    #[error("Failed to list {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// Copying one resolved file to the destination failed.
    #[error("Failed to copy {} -> {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

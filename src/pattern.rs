//! # Pattern Classification and Resolution
//!
//! A steering pattern names files inside a snapshot in one of three ways:
//!
//! - **Exact file**: `docs/style.md`
//! - **Directory**: `docs/rules` selects every regular file below it
//! - **Glob**: `guides/*.md`, anything containing `*`, `?` or `[`
//!
//! [`resolve`] turns a pattern into an ordered list of absolute source paths.
//! Directory walks are sorted by file name and glob matches are sorted
//! lexicographically, so the same snapshot always resolves the same way.
//!
//! Patterns are always relative to the snapshot root. A leading `/` is
//! ignored and any `..` component is rejected, so a pattern can never select
//! files outside the checkout. Nothing inside `.git` is ever selected by a
//! directory or glob pattern.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use glob::MatchOptions;
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

const WILDCARDS: [char; 3] = ['*', '?', '['];

const GIT_DIR: &str = ".git";

/// What a pattern turned out to be once checked against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// A single regular file at this absolute path.
    File(PathBuf),
    /// A directory at this absolute path, selected recursively.
    Directory(PathBuf),
    /// A wildcard expression, expanded by [`resolve`].
    Glob,
}

/// Files a pattern resolved to, plus failures on individual sub-paths.
///
/// A symlink loop or an unreadable subdirectory fails only the entries below
/// it; the rest of the walk still contributes files.
#[derive(Debug, Default)]
pub struct Resolution {
    pub files: Vec<PathBuf>,
    pub errors: Vec<Error>,
}

/// Whether the pattern contains a wildcard marker.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(WILDCARDS)
}

/// Classify `pattern` against the snapshot rooted at `root`.
///
/// Globs are recognised syntactically and never touch the filesystem here.
/// Anything else must exist as a directory or a regular file.
pub fn classify(root: &Path, pattern: &str) -> Result<PatternKind> {
    let relative = relative_pattern(pattern)?;
    if is_glob(pattern) {
        return Ok(PatternKind::Glob);
    }

    let path = root.join(relative);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => Ok(PatternKind::Directory(path)),
        Ok(meta) if meta.is_file() => Ok(PatternKind::File(path)),
        Ok(_) => Err(not_found(pattern)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found(pattern)),
        Err(e) => Err(Error::Walk {
            path,
            message: e.to_string(),
        }),
    }
}

/// Resolve `pattern` to the concrete files it selects under `root`.
///
/// Returns `Err` when the pattern as a whole fails: it does not exist, it
/// escapes the snapshot, it is a malformed glob, or a glob matched nothing.
pub fn resolve(root: &Path, pattern: &str) -> Result<Resolution> {
    let kind = classify(root, pattern)?;
    debug!("Pattern {:?} classified as {:?}", pattern, kind);

    match kind {
        PatternKind::File(path) => Ok(Resolution {
            files: vec![path],
            errors: Vec::new(),
        }),
        PatternKind::Directory(dir) => Ok(walk_directory(&dir)),
        PatternKind::Glob => expand_glob(root, pattern),
    }
}

/// Strip a leading `/` and reject anything that could leave the snapshot.
fn relative_pattern(pattern: &str) -> Result<&Path> {
    let relative = Path::new(pattern.trim_start_matches('/'));
    let escapes = relative.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(Error::PatternOutsideRepository {
            pattern: pattern.to_string(),
        });
    }
    Ok(relative)
}

fn not_found(pattern: &str) -> Error {
    Error::PatternNotFound {
        pattern: pattern.to_string(),
    }
}

/// Every regular file below `dir`, depth-first, sorted by file name.
///
/// Symlinks are followed; walkdir detects cycles and reports them as errors
/// on the offending entry instead of looping.
fn walk_directory(dir: &Path) -> Resolution {
    let mut resolution = Resolution::default();

    for entry in snapshot_walker(dir, None) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                resolution.files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => resolution.errors.push(walk_error(dir, e)),
        }
    }

    resolution
}

/// Walk below `dir`, following symlinks and never descending into `.git`.
fn snapshot_walker(
    dir: &Path,
    max_depth: Option<usize>,
) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> {
    let mut walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }
    walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != GIT_DIR)
}

fn walk_error(dir: &Path, e: walkdir::Error) -> Error {
    Error::Walk {
        path: e.path().unwrap_or(dir).to_path_buf(),
        message: e.to_string(),
    }
}

/// Expand a glob rooted at the snapshot.
///
/// The walk starts at the longest wildcard-free prefix of the pattern and is
/// bounded by its component count unless the pattern contains `**`. Each
/// file's snapshot-relative path is then matched against the pattern.
fn expand_glob(root: &Path, pattern: &str) -> Result<Resolution> {
    let relative = pattern.trim_start_matches('/').trim_start_matches("./");
    let matcher = glob::Pattern::new(relative)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let (prefix, max_depth) = glob_base(Path::new(relative));
    let base = root.join(prefix);
    let mut resolution = Resolution::default();

    if base.is_dir() {
        for entry in snapshot_walker(&base, max_depth) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    let matched = entry
                        .path()
                        .strip_prefix(root)
                        .map(|rel| matcher.matches_path_with(rel, options))
                        .unwrap_or(false);
                    if matched && !inside_git_dir(root, entry.path()) {
                        resolution.files.push(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(e) => resolution.errors.push(walk_error(&base, e)),
            }
        }
    }

    if resolution.files.is_empty() && resolution.errors.is_empty() {
        return Err(Error::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    resolution.files.sort();
    Ok(resolution)
}

/// Split a glob into its literal directory prefix and the walk depth needed
/// below it (`None` when `**` makes it unbounded).
fn glob_base(relative: &Path) -> (PathBuf, Option<usize>) {
    let parts: Vec<Component> = relative.components().collect();
    let first_wild = parts
        .iter()
        .position(|c| is_glob(&c.as_os_str().to_string_lossy()));

    match first_wild {
        Some(index) => {
            let prefix: PathBuf = parts[..index].iter().collect();
            let rest = &parts[index..];
            let recursive = rest.iter().any(|c| c.as_os_str() == "**");
            (prefix, if recursive { None } else { Some(rest.len()) })
        }
        None => (relative.to_path_buf(), Some(0)),
    }
}

fn inside_git_dir(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .map(|rel| rel.components().any(|c| c.as_os_str() == GIT_DIR))
        .unwrap_or(false)
}

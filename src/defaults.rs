//! Default values for kiro-doc-sync.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Config file looked up in the project root when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "kiro-doc-sync.cfg.json";

/// Prefix for per-source temporary snapshot directories.
pub const SNAPSHOT_DIR_PREFIX: &str = "kiro-sync-";

/// Returns the steering directory every synced file lands in.
///
/// The layout is fixed: `<project_root>/.kiro/steering`.
pub fn steering_dir(project_root: &Path) -> PathBuf {
    project_root.join(".kiro").join("steering")
}

/// Resolves a config path against the project root.
///
/// Absolute paths are returned unchanged; relative ones are joined onto
/// `project_root`. `None` falls back to [`DEFAULT_CONFIG_FILENAME`].
pub fn resolve_config_path(project_root: &Path, config_file: Option<&Path>) -> PathBuf {
    let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILENAME));
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        project_root.join(file)
    }
}

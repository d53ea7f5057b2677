//! # Configuration Schema and Loading
//!
//! This module defines the data structures that represent the
//! `kiro-doc-sync.cfg.json` configuration file and the logic for loading and
//! validating it.
//!
//! ## Format
//!
//! ```json
//! {
//!   "general": { "files": { "sync_override": false } },
//!   "docs": [
//!     {
//!       "git": "https://github.com/org/standards.git",
//!       "tag": "v1.2.0",
//!       "steering": ["docs/style.md", "docs/rules", "guides/*.md"]
//!     }
//!   ]
//! }
//! ```
//!
//! Each entry of `docs` is a [`DocSource`]. Its `steering` list holds the
//! patterns to pull out of that repository, processed in order.
//!
//! Validation runs before anything is fetched: a config that loads
//! successfully is guaranteed to have at least one source, and every source
//! has a URL and at least one pattern.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// The root of the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Settings shared by every doc source.
    pub general: GeneralConfig,
    /// Doc sources, processed in order.
    #[serde(default)]
    pub docs: Vec<DocSource>,
}

/// `general` section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub files: FilesConfig,
}

/// `general.files` section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Whether existing files in the steering directory are overwritten.
    ///
    /// Optional at the serde level so that a missing key is reported by
    /// [`validate`] with a readable message instead of a serde error.
    #[serde(default)]
    pub sync_override: Option<bool>,
}

/// One remote repository and the patterns to extract from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSource {
    /// Repository URL, anything `git clone` accepts.
    #[serde(default)]
    pub git: String,
    /// Patterns to sync: exact files, directories, or globs.
    #[serde(default)]
    pub steering: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl DocSource {
    /// The ref to check out: the tag if set, else the branch, else `None`
    /// for the remote's default branch.
    pub fn checkout_ref(&self) -> Option<&str> {
        self.tag.as_deref().or(self.branch.as_deref())
    }
}

impl SyncConfig {
    /// The validated overwrite flag.
    pub fn sync_override(&self) -> bool {
        self.general.files.sync_override.unwrap_or(false)
    }
}

/// Parse a configuration from a JSON string and validate it.
pub fn parse(json_content: &str) -> Result<SyncConfig> {
    let config: SyncConfig =
        serde_json::from_str(json_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "The config must be a JSON object with `general.files.sync_override` and `docs`"
                    .to_string(),
            ),
        })?;
    validate(&config)?;
    Ok(config)
}

/// Load the configuration for a project.
///
/// `config_file` is resolved relative to `project_root` unless it is
/// absolute; `None` means the default file name.
pub fn load_config(project_root: &Path, config_file: Option<&Path>) -> Result<SyncConfig> {
    let config_path = defaults::resolve_config_path(project_root, config_file);

    if !config_path.exists() {
        return Err(Error::ConfigNotFound { path: config_path });
    }

    let content = std::fs::read_to_string(&config_path)?;
    parse(&content)
}

/// Check the structural requirements the sync engine relies on.
pub fn validate(config: &SyncConfig) -> Result<()> {
    if config.general.files.sync_override.is_none() {
        return Err(invalid("missing general.files.sync_override"));
    }

    if config.docs.is_empty() {
        return Err(invalid("docs must be a non-empty array"));
    }

    for (index, doc) in config.docs.iter().enumerate() {
        if doc.git.trim().is_empty() {
            return Err(invalid(format!("docs[{}] missing git URL", index)));
        }
        if doc.steering.is_empty() {
            return Err(invalid(format!(
                "docs[{}] steering must be a non-empty array",
                index
            )));
        }
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigInvalid {
        message: message.into(),
    }
}

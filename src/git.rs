use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::Error;

/// Ref name reported in errors when no branch or tag was requested.
const DEFAULT_REF_LABEL: &str = "HEAD";

/// Clone a repository with `--depth=1`, optionally at a branch or tag.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// With `ref_name == None` the remote's default branch is checked out.
pub fn clone_shallow(url: &str, ref_name: Option<&str>, target_dir: &Path) -> Result<(), Error> {
    // git won't clone into an existing non-empty dir
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let args = clone_args(url, ref_name);
    let ref_label = ref_name.unwrap_or(DEFAULT_REF_LABEL);
    info!("Cloning {}@{} (depth 1)", url, ref_label);
    debug!("git {} {}", args.join(" "), target_dir.display());

    let output = Command::new("git")
        .args(&args)
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            r#ref: ref_label.to_string(),
            message: e.to_string(),
            hint: Some("Make sure `git` is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::GitClone {
            url: url.to_string(),
            r#ref: ref_label.to_string(),
            hint: auth_hint(&stderr),
            message: stderr,
        });
    }

    Ok(())
}

/// Arguments for `git clone`, without the trailing target directory.
fn clone_args(url: &str, ref_name: Option<&str>) -> Vec<String> {
    let mut args = vec!["clone".to_string(), "--depth=1".to_string()];
    if let Some(ref_name) = ref_name {
        args.push("--branch".to_string());
        args.push(ref_name.to_string());
    }
    // A URL starting with `-` must stay positional
    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// Provide a helpful hint for common auth failures.
fn auth_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository. For private repos, ensure an SSH \
             key is loaded in ssh-agent, git credentials are configured, or a personal access \
             token is set up"
                .to_string(),
        )
    } else {
        None
    }
}

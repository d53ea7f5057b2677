//! Sync command implementation
//!
//! Loads the configuration, syncs every doc source into
//! `<project>/.kiro/steering`, and prints the report. The exit status is
//! success only when the report has no errors.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use kiro_doc_sync::config;
use kiro_doc_sync::defaults;
use kiro_doc_sync::output::{emoji, render_report, OutputConfig};
use kiro_doc_sync::prompt::{Decline, LinePrompt};
use kiro_doc_sync::sync::DocSync;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to config file, relative to the project root unless absolute
    /// [default: kiro-doc-sync.cfg.json]
    #[arg(short, long, value_name = "PATH", env = "KIRO_DOC_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root directory (defaults to current directory)
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Ask for confirmation when files already exist
    #[arg(short, long)]
    pub interactive: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<ExitCode> {
    let project_root = match args.project {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config_path = defaults::resolve_config_path(&project_root, args.config.as_deref());

    println!("Project root: {}", project_root.display());
    println!("Config file: {}", config_path.display());
    if args.interactive {
        println!("Mode: Interactive");
    }
    println!();

    println!(
        "{} Loading configuration...",
        emoji(output, "📋", "[CONFIG]")
    );
    let config = config::load_config(&project_root, args.config.as_deref())?;
    println!("Found {} doc source(s)\n", config.docs.len());

    let doc_sync = DocSync::new(&project_root, args.interactive);
    let report = if args.interactive {
        let mut prompt = LinePrompt::stdio();
        let report = doc_sync.sync(&config, &mut prompt);
        prompt.close()?;
        report
    } else {
        doc_sync.sync(&config, &mut Decline)
    };

    println!();
    println!("{}", render_report(output, &report));

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

//! CLI argument parsing, logging setup and command dispatch

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use kiro_doc_sync::output::OutputConfig;

use crate::commands;

/// Kiro Doc Sync - Synchronize documentation files from remote Git repositories
#[derive(Parser, Debug)]
#[command(name = "kiro-doc-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    sync: commands::sync::SyncArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        commands::sync::execute(self.sync, &output)
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second init (e.g. from tests) is harmless; keep the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

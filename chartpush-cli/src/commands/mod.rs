//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod push;
mod reindex;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a packaged chart, then reindex the repository
    Push {
        /// Path to the chart tarball (e.g. mychart-0.1.0.tgz)
        tarball: PathBuf,

        /// Chart name; defaults to the file name without its version
        #[arg(short, long)]
        name: Option<String>,

        /// Do not reindex the repository after uploading
        #[arg(long)]
        skip_reindex: bool,
    },
    /// Rebuild the repository index
    Reindex,
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Push {
            tarball,
            name,
            skip_reindex,
        } => push::handle_push_command(&tarball, name, skip_reindex, config).await,
        Commands::Reindex => reindex::handle_reindex_command(config).await,
    }
}

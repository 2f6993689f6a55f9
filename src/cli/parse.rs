//! CLI parse: clap types for release-gate. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// release-gate - time-windowed visibility checks for content trees
#[derive(Parser)]
#[command(name = "release-gate")]
#[command(about = "Check whether pages are inside their release window")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether a viewer can see a page
    Check {
        /// Site document (.json or .toml)
        #[arg(long)]
        site: PathBuf,
        /// Page id
        #[arg(long)]
        page: u64,
        /// Viewer name (defaults to the site's current viewer)
        #[arg(long)]
        viewer: Option<String>,
        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long)]
        at: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the release state of every page in a site
    Status {
        /// Site document (.json or .toml)
        #[arg(long)]
        site: PathBuf,
        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long)]
        at: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Validate the resolved configuration
    Validate,
}

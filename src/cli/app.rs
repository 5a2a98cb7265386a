use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_FILE;

/// Keep a local markdown directory in sync with a Confluence space
#[derive(Parser, Debug)]
#[command(name = "confluence-sync", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(
        long,
        global = true,
        env = "CONFLUENCE_SYNC_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a template configuration file
    Init {
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },
    /// Create a configuration file from prompted values
    Setup(SetupArgs),
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Print the API token instead of masking it
        #[arg(long)]
        reveal: bool,
    },
    /// Validate configuration
    Validate,
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct SetupArgs {
    /// Confluence instance URL
    #[arg(long)]
    pub url: Option<String>,
    /// API token for authentication
    #[arg(long)]
    pub api_token: Option<String>,
    /// Confluence space key
    #[arg(long)]
    pub space_key: Option<String>,
    /// Local directory for markdown files
    #[arg(long)]
    pub local_path: Option<PathBuf>,
    /// Username for legacy authentication
    #[arg(long)]
    pub username: Option<String>,
    /// Overwrite an existing file without asking
    #[arg(short, long)]
    pub force: bool,
}

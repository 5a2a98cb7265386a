use clap::Parser;

use confluence_sync::cli::commands::config;
use confluence_sync::cli::{Cli, Commands};
use confluence_sync::telemetry::{TracingConfig, init_tracing};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _tracing = init_tracing(&TracingConfig::from_flags(cli.debug, cli.log_json));

    match cli.command {
        Some(Commands::Config { action }) => config::run(action, &cli.config),
        None => {
            println!("confluence-sync - Confluence documentation sync");
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

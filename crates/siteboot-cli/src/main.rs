//! siteboot - documentation-site development bootstrapper

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use siteboot_cli::ops::prereq::MissingRequiredCommand;
use siteboot_cli::{Cli, Commands, cmd};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Up { owner: None });
    let result = match command {
        Commands::Up { owner } => cmd::up::up(&cli.config, owner).await,
        Commands::Provision => cmd::provision::provision(&cli.config).await,
        Commands::Watch => cmd::watch::watch(&cli.config).await,
        Commands::Doctor => cmd::doctor::doctor(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            if error.downcast_ref::<MissingRequiredCommand>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

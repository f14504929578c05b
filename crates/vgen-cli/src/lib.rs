//! `vgen` command-line client.
//!
//! Submits product video jobs, follows them until the service reports a
//! result, and downloads the finished videos.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

use anyhow::Result;
use tracing::debug;

use vgen_client::VideoClient;

pub use cli::{Cli, Commands};
pub use config::CliConfig;

/// Run a parsed command line. `Ok(false)` means exit non-zero.
pub async fn run(cli: Cli, config: CliConfig) -> Result<bool> {
    let config = config.with_cli(&cli);
    debug!(?config, "Resolved configuration");

    let client = VideoClient::new(config.client.clone())?;

    match cli.command {
        Commands::Create(args) => {
            let poller = config.poller_for(&args.poll);
            commands::create(&client, poller, args).await
        }
        Commands::Watch { id, poll, download } => {
            commands::watch(&client, config.poller_for(&poll), &id, download.as_deref()).await
        }
        Commands::Status { id } => commands::status(&client, &id).await,
        Commands::Show { id } => commands::show(&client, &id).await,
        Commands::Download { id, output } => commands::download(&client, &id, output).await,
        Commands::Health => commands::health(&client).await,
    }
}

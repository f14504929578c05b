//! `vgen` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use vgen_cli::{logging, run, Cli, CliConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_tracing();

    match run(cli, CliConfig::from_env()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

use anyhow::Result;
use clap::Parser;

use buschat::{app::default_log_path, cli::Cli, runtime::Orchestrator, utils::init_logger};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // The chat UI owns the terminal, so its logs go to a file
    let log_file = match &cli.log_file {
        Some(path) => Some(path.clone()),
        None if cli.is_interactive() => default_log_path(),
        None => None,
    };
    if let Err(e) = init_logger(cli.verbose, log_file.as_deref()) {
        eprintln!("⚠️  Logging disabled: {:#}", e);
    }

    let orchestrator = Orchestrator::new(cli)?;
    orchestrator.run().await
}

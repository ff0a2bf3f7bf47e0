use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    directions::{DirectionsService, HttpDirectionsClient},
};

use super::Commands;

/// Handle CLI subcommands that don't need a conversation.
///
/// Returns `false` when the caller should carry on into the chat interface.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing BusChat configuration...");
            init_config()?;
            println!("{}", "Configuration initialized successfully!".green());
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Chat | Commands::Route { .. } => Ok(false),
    }
}

/// Show version information
pub fn show_version() {
    println!("BusChat v{}", env!("CARGO_PKG_VERSION"));
    println!("   Find a bus route by chatting with Bus Chat");
}

/// Show configuration and service reachability
async fn show_status(config: &Config) -> Result<()> {
    println!("BusChat Status:");
    println!();

    match get_config_dir() {
        Ok(dir) => {
            let config_path = dir.join("config.toml");
            if config_path.exists() {
                println!("  {} Configuration: {}", "[OK]".green(), config_path.display());
            } else {
                println!(
                    "  {} Configuration: Not found (using defaults)",
                    "[WARNING]".yellow()
                );
            }
        }
        Err(e) => println!("  {} Configuration: {}", "[ERROR]".red(), e),
    }

    let client = HttpDirectionsClient::new(&config.service)?;
    if client.is_reachable().await {
        println!(
            "  {} Directions service: Reachable at {}",
            "[OK]".green(),
            client.endpoint()
        );
    } else {
        println!(
            "  {} Directions service: Not reachable at {}",
            "[ERROR]".red(),
            client.endpoint()
        );
    }

    match config.service.request_timeout_secs {
        Some(secs) => println!("      • Request timeout: {}s", secs),
        None => println!("      • Request timeout: none"),
    }

    println!();
    Ok(())
}

use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    app::{load_config, load_config_from, Config},
    cli::{handle_command, Cli, Commands, OutputFormat},
    directions::HttpDirectionsClient,
    runtime::NonInteractiveRunner,
    tui::{run_ui, App},
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            // An explicit file that fails to load is fatal.
            Some(path) => load_config_from(path)?,
            None => match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("⚠️  Failed to load config: {}. Using defaults.", e);
                    Config::default()
                }
            },
        };

        if let Some(base_url) = &cli.base_url {
            config.service.base_url = base_url.clone();
        }

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        match &self.cli.command {
            Some(Commands::Route {
                from,
                to,
                output_format,
            }) => return self.run_route(from, to, *output_format).await,
            Some(command) => {
                if handle_command(command, &self.config).await? {
                    return Ok(());
                }
            }
            None => {}
        }

        self.run_chat().await
    }

    async fn run_route(&self, from: &str, to: &str, format: OutputFormat) -> Result<()> {
        let runner = NonInteractiveRunner::new(&self.config)?;
        let result = runner.execute(from, to).await?;
        println!("{}", runner.format_result(&result, format));

        if result.is_failure() {
            std::process::exit(1);
        }
        Ok(())
    }

    async fn run_chat(&self) -> Result<()> {
        let client = HttpDirectionsClient::new(&self.config.service)?;

        println!(
            "🚌 Starting {} against {}",
            self.config.ui.bot_name,
            client.base_url().green()
        );
        info!(base_url = client.base_url(), "Starting interactive session");

        let app = App::new(&self.config, client.base_url().to_string());
        let result = run_ui(app, Arc::new(client)).await;

        if let Err(e) = &result {
            warn!("Chat session ended with an error: {}", e);
        }
        result
    }
}

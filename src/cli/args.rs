use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "buschat")]
#[command(version)]
#[command(about = "Find a bus route by chatting with Bus Chat", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directions service base URL (overrides configuration)
    #[arg(long, env = "BUSCHAT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Write logs to this file instead of the default location
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Does this invocation take over the terminal?
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Chat))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start a chat session (default)
    Chat,
    /// Look up one route without the chat interface
    Route {
        /// Starting location
        from: String,
        /// Destination
        to: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Write a default configuration file
    Init,
    /// Check configuration and whether the directions service answers
    Status,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text transcript
    Text,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["buschat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_route_subcommand() {
        let cli = Cli::try_parse_from([
            "buschat",
            "--base-url",
            "http://localhost:3000",
            "route",
            "Ben Thanh Market",
            "District 7",
            "--output-format",
            "json",
        ])
        .unwrap();

        assert!(!cli.is_interactive());
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(
            cli.command,
            Some(Commands::Route {
                from: "Ben Thanh Market".to_string(),
                to: "District 7".to_string(),
                output_format: OutputFormat::Json,
            })
        );
    }

    #[test]
    fn test_route_requires_both_locations() {
        assert!(Cli::try_parse_from(["buschat", "route", "only-one"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["buschat", "status", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.command, Some(Commands::Status));
    }
}

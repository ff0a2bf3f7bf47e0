use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{CHAT_BOT_NAME, DEFAULT_DIRECTIONS_BASE_URL, LOG_FILE_NAME};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directions service configuration
    #[serde(default)]
    pub service: ServiceSettings,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Where and how to reach the directions service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Base URL; `/direction/index` is appended
    pub base_url: String,
    /// Per-request timeout. Unset means wait for the transport to give up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTIONS_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIConfig {
    /// Color theme (dark or light)
    pub theme: String,
    /// Show message times in the chat pane
    pub show_timestamps: bool,
    /// Name shown on bot messages
    pub bot_name: String,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_timestamps: true,
            bot_name: CHAT_BOT_NAME.to_string(),
        }
    }
}

/// Layer defaults, an optional file and `BUSCHAT_` environment variables
fn figment_for(files: &[PathBuf]) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    // BUSCHAT_SERVICE__BASE_URL -> service.base_url
    figment.merge(Env::prefixed("BUSCHAT_").split("__"))
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(".buschat/config.toml");

    figment_for(&[global_config, local_config])
        .extract()
        .context("Failed to load configuration")
}

/// Load configuration from an explicit file, still honouring environment overrides
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    figment_for(&[path.to_path_buf()])
        .extract()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "buschat") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("buschat");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Default log file location for interactive sessions
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "buschat").map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<PathBuf> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    } else {
        println!("Configuration already exists at: {}", config_file.display());
    }

    Ok(config_file)
}

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter used when `RUST_LOG` is not set
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` wins over `verbose`. When `log_file` is given, output is
/// appended to that file instead of stderr so the terminal UI stays clean.
pub fn init_logger(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false) // Don't show module paths
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create log directory {}", parent.display())
                    })?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_writer(io::stderr))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }

    Ok(())
}

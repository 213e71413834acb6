//! Tracing setup for the quicksearch CLI
//!
//! Usage:
//!   quicksearch --debug ...                  # Debug logging
//!   RUST_LOG=quicksearch_core=debug ...      # Fine-grained log control
//!
//! The TUI owns the terminal, so in that mode logs are appended to
//! `~/.quicksearch/logs/quicksearch.log` instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl TracingConfig {
    /// Default log file for terminal-owning modes
    pub fn default_log_file() -> PathBuf {
        quicksearch_core::SearchConfig::config_dir()
            .join("logs")
            .join("quicksearch.log")
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    let fallback = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = env_filter(config.debug);

    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(config.debug) // Show targets in debug mode
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}

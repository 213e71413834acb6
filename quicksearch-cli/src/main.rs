//! quicksearch CLI - search-as-you-type over the OMDb title index
//!
//! This is the main entry point for the quicksearch command-line tool, which provides:
//! - Interactive debounced search with paging (`tui` subcommand)
//! - One-shot searches for scripts (`search` subcommand)
//! - Config inspection and scaffolding (`config` subcommand)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quicksearch_core::SearchConfig;
use quicksearch_omdb::OmdbClient;
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;
mod tui;
mod ui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "quicksearch",
    author,
    version,
    about = "Debounced, cancelable, paginated title search",
    long_about = "Search the OMDb title index as you type. Input is debounced, stale requests \
                  are cancelled, and results are shown a page at a time."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Config file (default: ~/.quicksearch/config.toml)
    #[arg(long, value_name = "PATH", global = true, env = "QUICKSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Quiet period before a search is issued, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    debounce_ms: Option<u64>,

    /// Results per page
    #[arg(long, value_name = "N", global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive search screen
    Tui,
    /// Run a single search and print one page of results
    Search(commands::SearchArgs),
    /// Manage quicksearch configuration (init, show, validate, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(SearchConfig::config_path)
    }

    /// File, then environment, then flags
    fn load_config(&self) -> Result<SearchConfig> {
        let path = self.config_path();
        let mut config = SearchConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;

        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    quicksearch_omdb::load_env();

    // The TUI owns the terminal, so its logs go to a file
    let log_file = matches!(cli.command, Commands::Tui).then(TracingConfig::default_log_file);
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        log_file,
    })
    .ok();

    // Initialize UI quiet mode from flag, env var, and TTY detection
    ui::init_quiet_mode(cli.quiet);

    let config_path = cli.config_path();
    let effective = || -> Result<SearchConfig> {
        let config = cli.load_config()?;
        debug!(?config, "effective configuration");
        Ok(config)
    };

    match &cli.command {
        Commands::Tui => {
            let config = effective()?;
            let client = OmdbClient::from_env()?;
            tui::run(&config, Arc::new(client)).await?
        }
        Commands::Search(args) => commands::run_search(args, &effective()?).await?,
        Commands::Config(args) => config::run_config(args, &config_path, effective)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

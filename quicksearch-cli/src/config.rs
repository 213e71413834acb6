use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quicksearch_core::SearchConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the effective config (file, environment and flags merged)
    Show,
    /// Check the config file and environment overrides
    Validate,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// `path` is the config file in use; `effective` merges file, environment and flags
pub fn run_config<F>(args: &ConfigArgs, path: &Path, effective: F) -> Result<()>
where
    F: FnOnce() -> Result<SearchConfig>,
{
    match &args.command {
        ConfigCommands::Init(args) => run_init(args, path),
        ConfigCommands::Show => run_show(&effective()?),
        ConfigCommands::Validate => run_validate(path),
        ConfigCommands::Path => run_path(path),
    }
}

fn run_init(args: &InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            path
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }

    std::fs::write(path, SearchConfig::default().to_toml())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    println!("✅ Created config at: {:?}", path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", path);
    println!("  2. Put OMDB_API_KEY in ~/.quicksearch/.env");
    println!("  3. Run: quicksearch config validate");

    Ok(())
}

fn run_show(effective: &SearchConfig) -> Result<()> {
    print!("{}", effective.to_toml());
    Ok(())
}

fn run_validate(path: &Path) -> Result<()> {
    println!("🔍 Validating configuration...");

    if path.exists() {
        println!("   ✓ Config file: {}", path.display());
    } else {
        println!("   ⚠ No config file at {} (using defaults)", path.display());
    }

    let config = SearchConfig::load_with_env(path)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    println!(
        "   ✓ debounce {}ms, {} per page, up to {} page links",
        config.debounce_ms, config.page_size, config.max_page_links
    );

    if std::env::var("OMDB_API_KEY").map(|k| k.trim().is_empty()).unwrap_or(true) {
        println!("   ⚠ OMDB_API_KEY not set; searches will fail");
    } else {
        println!("   ✓ OMDB_API_KEY is set");
    }

    println!("\n✅ Configuration valid!");
    Ok(())
}

fn run_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

use std::env;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::paginator::{DEFAULT_MAX_PAGE_LINKS, DEFAULT_PAGE_SIZE};

/// Default quiet period before a query is issued
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Smallest page strip that still fits first, ellipsis, current, ellipsis, last
const MIN_PAGE_LINKS: usize = 5;

pub const ENV_DEBOUNCE_MS: &str = "QUICKSEARCH_DEBOUNCE_MS";
pub const ENV_PAGE_SIZE: &str = "QUICKSEARCH_PAGE_SIZE";

/// Pipeline configuration
///
/// Resolution order: built-in defaults, then `~/.quicksearch/config.toml`,
/// then `QUICKSEARCH_*` environment variables. The CLI applies its own
/// flags last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Quiet period in milliseconds (0 disables debouncing)
    pub debounce_ms: u64,
    /// Items per page
    pub page_size: usize,
    /// Width of the page-number strip before ellipses kick in
    pub max_page_links: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_links: DEFAULT_MAX_PAGE_LINKS,
        }
    }
}

impl SearchConfig {
    /// Get config directory: ~/.quicksearch
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quicksearch")
    }

    /// Get config file path: ~/.quicksearch/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load from the default path and apply environment overrides.
    ///
    /// A missing config file is not an error.
    pub fn load() -> ConfigResult<Self> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load from `path` and apply environment overrides.
    pub fn load_with_env(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` only; defaults when the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(ConfigError::io(path, err)),
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            self.debounce_ms = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(ENV_DEBOUNCE_MS, format!("expected milliseconds, got '{raw}'"))
            })?;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            self.page_size = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(ENV_PAGE_SIZE, format!("expected a page size, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.page_size_nonzero()?;
        if self.max_page_links < MIN_PAGE_LINKS {
            return Err(ConfigError::invalid(
                "max_page_links",
                format!("must be at least {MIN_PAGE_LINKS}"),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn page_size_nonzero(&self) -> ConfigResult<NonZeroUsize> {
        NonZeroUsize::new(self.page_size)
            .ok_or_else(|| ConfigError::invalid("page_size", "must be at least 1"))
    }

    /// Render as TOML (for `quicksearch config show`)
    pub fn to_toml(&self) -> String {
        // Plain integer fields always serialize
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

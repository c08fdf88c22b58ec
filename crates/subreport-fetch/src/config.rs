//! Reporter configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::DEFAULT_BASE_URL;

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "subreport.toml";

/// Settings read from `subreport.toml`. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterConfig {
    /// API base URL used when `--base-url` is not given.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Print the per-student date range block.
    #[serde(default = "default_true")]
    pub show_date_ranges: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            show_date_ranges: true,
        }
    }
}

impl ReporterConfig {
    /// Resolve the base URL: explicit flag, then config, then the default.
    pub fn resolve_base_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `subreport.toml` in the current directory
/// 2. `~/.config/subreport/config.toml`
///
/// Finding neither yields the defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<ReporterConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            if local.exists() {
                Some(local)
            } else {
                global_config_path().filter(|global| global.exists())
            }
        }
    };

    match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            parse_config_file(&path)
        }
        None => Ok(ReporterConfig::default()),
    }
}

fn parse_config_file(path: &Path) -> Result<ReporterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<ReporterConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("subreport")
            .join("config.toml")
    })
}

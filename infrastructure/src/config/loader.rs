//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_FILES: [&str; 2] = ["salesforce-mcp.toml", ".salesforce-mcp.toml"];

const ENV_PREFIX: &str = "SALESFORCE_";

/// `[salesforce]` keys read verbatim from the environment, so that `59.0`
/// or an all-digit password is not parsed into a number
const STRING_KEYS: [&str; 7] = [
    "instance_url",
    "username",
    "password",
    "token",
    "consumer_key",
    "consumer_secret",
    "api_version",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SALESFORCE_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./salesforce-mcp.toml` or `./.salesforce-mcp.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/salesforce-mcp/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let figment = Self::merge_env(Self::file_figment(config_path));
        Ok(figment.extract().map_err(Box::new)?)
    }

    /// Defaults plus environment, no files (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, ConfigError> {
        let figment =
            Self::merge_env(Figment::new().merge(Serialized::defaults(FileConfig::default())));
        Ok(figment.extract().map_err(Box::new)?)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults and TOML files, without the environment layer
    fn file_figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Layer `SALESFORCE_*` variables over `figment`
    ///
    /// `SALESFORCE_USERNAME` → `salesforce.username`, and so on. String keys
    /// keep their raw text; the rest (`timeout_secs`) are parsed as usual.
    fn merge_env(figment: Figment) -> Figment {
        let mut figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&STRING_KEYS)
                .map(|key| format!("salesforce.{}", key.as_str()).into()),
        );
        for (key, value) in Env::prefixed(ENV_PREFIX).only(&STRING_KEYS).iter() {
            figment = figment.merge(Serialized::default(
                &format!("salesforce.{}", key.as_str()),
                value,
            ));
        }
        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/salesforce-mcp/config.toml if set,
    /// otherwise falls back to ~/.config/salesforce-mcp/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("salesforce-mcp").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used, one line each
    pub fn config_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        lines.push("  [ENV  ] SALESFORCE_* environment variables".to_string());

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1])),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

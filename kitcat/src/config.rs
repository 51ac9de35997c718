// ABOUTME: Configuration file loading, validation, and hierarchical merging for kitcat
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{Context, Result, anyhow};
use kitcat_core::ResizeFilter;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub max_height: Option<u32>,
    #[serde(default, deserialize_with = "validate_filter")]
    pub filter: Option<ResizeFilter>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from file paths ordered highest precedence first.
    /// Missing or unreadable files are skipped.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths.iter().rev() {
            match Self::load_from_file(path) {
                Ok(file_config) => {
                    log::debug!("Loaded config from {}", path.as_ref().display());
                    config = config.merge(file_config);
                }
                Err(e) if path.as_ref().exists() => {
                    log::debug!("Ignoring config {}: {:#}", path.as_ref().display(), e);
                }
                Err(_) => {}
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("kitcat.toml"));
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(config_home).join("kitcat").join("config.toml"));
        }

        // 3. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("kitcat").join("config.toml"));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            max_width: other.max_width.or(self.max_width),
            max_height: other.max_height.or(self.max_height),
            filter: other.filter.or(self.filter),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_width == Some(0) {
            return Err(anyhow!("max_width must be at least 1 pixel"));
        }
        if self.max_height == Some(0) {
            return Err(anyhow!("max_height must be at least 1 pixel"));
        }
        Ok(())
    }
}

// Custom deserializer for filter validation
fn validate_filter<'de, D>(deserializer: D) -> Result<Option<ResizeFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|name| name.parse::<ResizeFilter>().map_err(D::Error::custom))
        .transpose()
}

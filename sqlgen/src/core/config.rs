use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::CONFIG_FILE_NAME;
use crate::sql::{Dialect, DialectSettings};

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub dialect: Option<Dialect>,
    pub connection_url: Option<String>,
    pub catalog: Option<String>,
    pub driver_filename: Option<String>,
    pub named_collection: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Names of fields this config does not recognize
    fn unknown_fields(&self) -> Vec<&str> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub dialect: Dialect,
    pub settings: DialectSettings,
}

impl AppConfig {
    /// Load configuration with layered priority
    ///
    /// Priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. CLI-specified config path OR `sqlgen.json` in the working directory
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let path = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.clone())
            }
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() { Some(local) } else { None }
            }
        };

        let file_config = match path {
            Some(path) => {
                let config = FileConfig::load_from_file(&path)?;
                config.warn_unknown_fields();
                config
            }
            None => FileConfig::default(),
        };

        let config = Self::layer(cli, file_config);
        tracing::debug!(dialect = %config.dialect, "Configuration loaded");
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn layer(cli: &CliConfig, file: FileConfig) -> Self {
        let defaults = DialectSettings::default();

        let dialect = cli.dialect.or(file.dialect).unwrap_or_default();

        let settings = DialectSettings {
            connection_url: cli.connection_url.clone().or(file.connection_url),
            catalog: cli
                .catalog
                .clone()
                .or(file.catalog)
                .unwrap_or(defaults.catalog),
            driver_filename: cli
                .driver_filename
                .clone()
                .or(file.driver_filename)
                .unwrap_or(defaults.driver_filename),
            named_collection: cli
                .named_collection
                .clone()
                .or(file.named_collection)
                .unwrap_or(defaults.named_collection),
        };

        Self { dialect, settings }
    }
}

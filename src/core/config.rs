//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::Project;
use crate::entities::quotation::{DEFAULT_PROFIT_PERCENTAGE, DEFAULT_QUANTITY};

/// Currency symbol used when none is configured
pub const DEFAULT_CURRENCY: &str = "¥";

/// Tool configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup used when `quote add` omits --profit
    pub default_profit: Option<f64>,

    /// Quantity used when `quote add` omits --qty
    pub default_quantity: Option<i64>,

    /// Currency symbol printed on documents
    pub currency: Option<String>,

    /// Default output format
    pub default_format: Option<String>,

    /// Data directory relative to the project root
    pub data_dir: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessor fallbacks)

        // 2. Global user config (~/.config/rjq/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.rjq/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_path()) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        if let Ok(profit) = std::env::var("RJQ_DEFAULT_PROFIT") {
            match profit.trim().parse::<f64>() {
                Ok(p) if p.is_finite() => config.default_profit = Some(p),
                _ => warn!(value = %profit, "ignoring invalid RJQ_DEFAULT_PROFIT"),
            }
        }
        if let Ok(currency) = std::env::var("RJQ_CURRENCY") {
            config.currency = Some(currency);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match Self::from_yaml_str(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Parse a config document; an empty or comment-only file yields defaults
    pub fn from_yaml_str(contents: &str) -> Result<Config, serde_yml::Error> {
        let value: serde_yml::Value = serde_yml::from_str(contents)?;
        if value.is_null() {
            return Ok(Config::default());
        }
        serde_yml::from_value(value)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rjq")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_profit.is_some() {
            self.default_profit = other.default_profit;
        }
        if other.default_quantity.is_some() {
            self.default_quantity = other.default_quantity;
        }
        if other.currency.is_some() {
            self.currency = other.currency;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
    }

    pub fn profit(&self) -> f64 {
        self.default_profit
            .filter(|p| p.is_finite())
            .unwrap_or(DEFAULT_PROFIT_PERCENTAGE)
    }

    pub fn quantity(&self) -> i64 {
        self.default_quantity.unwrap_or(DEFAULT_QUANTITY)
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

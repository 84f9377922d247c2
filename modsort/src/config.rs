//! Sorter configuration

use crate::module::DEFAULT_SEPARATOR;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How to pick among modules that become ready at the same time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Earlier input position first
    #[default]
    InputOrder,
    /// Ascending module name
    Lexical,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "input" | "input-order" => Ok(TieBreak::InputOrder),
            "lexical" => Ok(TieBreak::Lexical),
            other => Err(format!(
                "unknown tie-break '{}', expected 'input' or 'lexical'",
                other
            )),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::InputOrder => f.write_str("input-order"),
            TieBreak::Lexical => f.write_str("lexical"),
        }
    }
}

/// Sorter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorterConfig {
    /// Ordering among simultaneously ready modules
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Separator for dependency lists in manifests without their own
    #[serde(default = "default_separator")]
    pub separator: char,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            separator: default_separator(),
        }
    }
}

impl SorterConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::from_file(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("modsort").join("config.toml"))
    }
}

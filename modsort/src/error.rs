//! Module ordering error types

use std::path::PathBuf;
use thiserror::Error;

/// Type alias for module ordering results
pub type Result<T> = std::result::Result<T, SortError>;

/// Errors that can occur while ordering modules
#[derive(Error, Debug)]
pub enum SortError {
    /// The input modules contain at least one dependency cycle
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency {
        /// One concrete cycle, rendered as `a -> b -> a`
        cycle: String,
        /// Every module that could not be ordered, in input order
        unresolved: Vec<String>,
    },

    /// The same module name was supplied more than once
    #[error("Duplicate module: {name}")]
    DuplicateModule {
        /// The repeated module name
        name: String,
    },

    /// A module manifest could not be read or is malformed
    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest {
        /// Path of the manifest (empty when parsed from a string)
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SortError {
    /// Whether this error reports a dependency cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, SortError::CircularDependency { .. })
    }
}

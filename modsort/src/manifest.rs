//! Module manifests
//!
//! A manifest lists the modules to order together with the dependency names
//! each one declares. Dependencies are usually written as a single
//! delimiter-separated string, but an array of names is accepted as well:
//!
//! ```toml
//! [[module]]
//! name = "core"
//!
//! [[module]]
//! name = "web"
//! depends = "core, util"
//! ```

use crate::module::DEFAULT_SEPARATOR;
use crate::{Module, Result, SortError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifest file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Separator for string dependency lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,

    /// Declared modules, in file order
    #[serde(default, rename = "module")]
    pub modules: Vec<ManifestEntry>,
}

/// One module declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Module name
    pub name: String,

    /// Declared dependencies
    #[serde(default, skip_serializing_if = "Depends::is_empty")]
    pub depends: Depends,
}

/// Dependency declaration of a manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Depends {
    /// Delimiter-separated names
    List(String),

    /// Explicit names
    Names(Vec<String>),
}

impl Default for Depends {
    fn default() -> Self {
        Depends::Names(Vec::new())
    }
}

impl Depends {
    fn is_empty(&self) -> bool {
        match self {
            Depends::List(s) => s.trim().is_empty(),
            Depends::Names(names) => names.is_empty(),
        }
    }
}

impl ModuleManifest {
    /// Load a manifest, choosing TOML or JSON by file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SortError::InvalidManifest {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;

        let parsed = if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        };

        let manifest = parsed.map_err(|e| match e {
            SortError::InvalidManifest { message, .. } => SortError::InvalidManifest {
                path: path.to_path_buf(),
                message,
            },
            other => SortError::InvalidManifest {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        })?;

        debug!(
            "Loaded manifest {} with {} modules",
            path.display(),
            manifest.modules.len()
        );
        Ok(manifest)
    }

    /// Parse a JSON manifest
    pub fn from_json_str(s: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse a TOML manifest
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Save the manifest, choosing TOML or JSON by file extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate module names
    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.modules.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(SortError::InvalidManifest {
                    path: PathBuf::new(),
                    message: format!("Module #{} has an empty name", index + 1),
                });
            }
        }

        Ok(())
    }

    /// Build module descriptors.
    ///
    /// String dependency lists are split on the manifest's own separator,
    /// then `default_separator`.
    pub fn to_modules(&self, default_separator: Option<char>) -> Vec<Module> {
        let separator = self
            .separator
            .or(default_separator)
            .unwrap_or(DEFAULT_SEPARATOR);

        self.modules
            .iter()
            .map(|entry| {
                let mut module = Module::new(entry.name.trim());
                match &entry.depends {
                    Depends::List(list) => module.add_all_dependencies_with(list, separator),
                    Depends::Names(names) => module.extend_dependencies(names),
                }
                module
            })
            .collect()
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultModuleSorter, ModuleSorter};
    use tempfile::TempDir;

    #[test]
    fn test_toml_manifest() {
        let toml = r#"
[[module]]
name = "core"

[[module]]
name = "web"
depends = "core, util"

[[module]]
name = "cli"
depends = ["web", "core"]
"#;

        let manifest = ModuleManifest::from_toml_str(toml).unwrap();
        let modules = manifest.to_modules(None);

        assert_eq!(modules.len(), 3);
        assert!(modules[0].dependencies().is_empty());
        assert_eq!(modules[1].dependencies(), &["core", "util"]);
        assert_eq!(modules[2].dependencies(), &["web", "core"]);
    }

    #[test]
    fn test_json_manifest_with_separator() {
        let json = r#"{
            "separator": ";",
            "module": [
                { "name": "a" },
                { "name": "b", "depends": "a; x" }
            ]
        }"#;

        let manifest = ModuleManifest::from_json_str(json).unwrap();
        let modules = manifest.to_modules(Some(','));
        assert_eq!(modules[1].dependencies(), &["a", "x"]);
    }

    #[test]
    fn test_default_separator_applies() {
        let json = r#"{ "module": [ { "name": "b", "depends": "a|c" } ] }"#;
        let manifest = ModuleManifest::from_json_str(json).unwrap();

        assert_eq!(manifest.to_modules(Some('|'))[0].dependencies(), &["a", "c"]);
        assert_eq!(manifest.to_modules(None)[0].dependencies(), &["a|c"]);
    }

    #[test]
    fn test_array_dependencies_are_trimmed() {
        let toml = r#"
[[module]]
name = "b"
depends = ["a", " a ", ""]

[[module]]
name = "a"
"#;

        let manifest = ModuleManifest::from_toml_str(toml).unwrap();
        let modules = manifest.to_modules(None);
        assert_eq!(modules[0].dependencies(), &["a", "a"]);

        let sorted = DefaultModuleSorter::new().sort_names(&modules).unwrap();
        assert_eq!(sorted, vec!["a", "b"]);
    }

    #[test]
    fn test_is_toml() {
        assert!(is_toml(Path::new("modules.toml")));
        assert!(is_toml(Path::new("modules.TOML")));
        assert!(!is_toml(Path::new("modules.json")));
        assert!(!is_toml(Path::new("modules")));
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = r#"{ "module": [ { "name": "  " } ] }"#;
        let err = ModuleManifest::from_json_str(json).unwrap_err();
        assert!(matches!(err, SortError::InvalidManifest { .. }));
    }

    #[test]
    fn test_from_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modules.json");
        fs::write(&path, "{ not json").unwrap();

        match ModuleManifest::from_file(&path).unwrap_err() {
            SortError::InvalidManifest { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("Expected InvalidManifest, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");
        assert!(ModuleManifest::from_file(&path).is_err());
    }

    #[test]
    fn test_save_and_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modules.toml");

        let manifest = ModuleManifest {
            separator: None,
            modules: vec![
                ManifestEntry {
                    name: "a".to_string(),
                    depends: Depends::default(),
                },
                ManifestEntry {
                    name: "b".to_string(),
                    depends: Depends::List("a".to_string()),
                },
            ],
        };
        manifest.save(&path).unwrap();

        let loaded = ModuleManifest::from_file(&path).unwrap();
        let modules = loaded.to_modules(None);
        assert_eq!(modules[0], Module::new("a"));
        assert_eq!(modules[1].dependencies(), &["a"]);
    }
}

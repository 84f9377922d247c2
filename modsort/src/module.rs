//! Module descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default separator for bulk dependency lists
pub const DEFAULT_SEPARATOR: char = ',';

/// A named unit together with the names of the modules it depends on.
///
/// Dependencies are not validated when added. Names that do not match any
/// module handed to the sorter are ignored there, and duplicates collapse
/// into a single ordering constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
}

impl Module {
    /// Create a module with no dependencies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
        }
    }

    /// Create a module with the given dependencies
    pub fn with_dependencies<I, S>(name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// The module's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared dependency names, in declaration order
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether `name` is among the declared dependencies
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d == name)
    }

    /// Append one dependency name
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        self.dependencies.push(name.into());
    }

    /// Append every name of a comma-separated list, e.g. `"core, util"`
    pub fn add_all_dependencies(&mut self, names: &str) {
        self.add_all_dependencies_with(names, DEFAULT_SEPARATOR);
    }

    /// Append every name of a list split on `separator`.
    ///
    /// Names are trimmed and empty entries are skipped.
    pub fn add_all_dependencies_with(&mut self, names: &str, separator: char) {
        self.extend_dependencies(names.split(separator));
    }

    /// Append every name of an iterator.
    ///
    /// Names are trimmed and empty entries are skipped.
    pub fn extend_dependencies<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dependencies.extend(names.into_iter().filter_map(|n| {
            let n = n.as_ref().trim();
            (!n.is_empty()).then(|| n.to_string())
        }));
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

//! Command implementations

use crate::OutputFormat;
use anyhow::{Context, Result};
use modsort::{DefaultModuleSorter, Module, ModuleManifest, ModuleSorter, SortError, SorterConfig};
use std::path::Path;
use tracing::info;

fn load_modules(manifest_path: &Path, config: &SorterConfig) -> Result<Vec<Module>> {
    let manifest = ModuleManifest::from_file(manifest_path)?;
    Ok(manifest.to_modules(Some(config.separator)))
}

fn sort(manifest_path: &Path, config: &SorterConfig) -> Result<Vec<String>> {
    let modules = load_modules(manifest_path, config)?;
    let sorter = DefaultModuleSorter::from_config(config);

    match sorter.sort_names(&modules) {
        Ok(names) => Ok(names),
        Err(SortError::CircularDependency { cycle, unresolved }) => Err(anyhow::anyhow!(
            "Circular dependency detected: {}\nUnresolved modules: {}",
            cycle,
            unresolved.join(", ")
        ))
        .with_context(|| format!("Cannot order {}", manifest_path.display())),
        Err(e) => Err(e.into()),
    }
}

/// Render the dependency order of a manifest
pub fn order(manifest_path: &Path, config: &SorterConfig, format: OutputFormat) -> Result<String> {
    let names = sort(manifest_path, config)?;
    info!("Ordered {} modules using {}", names.len(), config.tie_break);

    match format {
        OutputFormat::Text => Ok(names.iter().map(|n| format!("{}\n", n)).collect()),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&names)?)),
    }
}

/// Verify that a manifest can be ordered
pub fn check(manifest_path: &Path, config: &SorterConfig) -> Result<String> {
    let names = sort(manifest_path, config)?;
    Ok(format!("ok ({} modules)", names.len()))
}

//! Modsort - dependency-aware module ordering
//!
//! This crate orders a set of named modules so that every module appears
//! after all of the modules it depends on:
//! - Module descriptors with delimiter-separated dependency lists
//! - Iterative topological sorting (Kahn's algorithm) with cycle detection
//! - Tolerant handling of dependencies on modules outside the input set
//! - Module manifests (JSON or TOML) and sorter configuration
//!
//! ```
//! use modsort::{DefaultModuleSorter, Module, ModuleSorter};
//!
//! let mut web = Module::new("web");
//! web.add_all_dependencies("core, util");
//!
//! let modules = vec![web, Module::new("util"), Module::new("core")];
//! let sorted = DefaultModuleSorter::new().sort_names(&modules).unwrap();
//! assert_eq!(sorted.last().map(String::as_str), Some("web"));
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod module;
pub mod sorter;

pub use config::{SorterConfig, TieBreak};
pub use error::{Result, SortError};
pub use manifest::{Depends, ManifestEntry, ModuleManifest};
pub use module::Module;
pub use sorter::{DefaultModuleSorter, ModuleSorter};

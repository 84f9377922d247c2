//! Dependency-aware module ordering
//!
//! The default sorter runs Kahn's algorithm over the modules handed to it:
//! modules whose dependencies are all placed become ready, ready modules are
//! emitted one at a time, and anything left over when no module is ready is
//! part of (or blocked by) a cycle. Dependency names that match no input
//! module are treated as already satisfied.

use crate::{Module, Result, SortError, SorterConfig, TieBreak};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// Orders modules so that every module follows its dependencies
pub trait ModuleSorter {
    /// Sort owned modules.
    ///
    /// Returns a permutation of `modules` in which each module appears after
    /// every input module it depends on. An empty input yields an empty
    /// order; a cycle among the inputs yields [`SortError::CircularDependency`].
    fn sort_modules(&self, modules: Vec<Module>) -> Result<Vec<Module>>;

    /// Sort borrowed modules
    fn sort_refs<'a>(&self, modules: &'a [Module]) -> Result<Vec<&'a Module>>;

    /// Sorted module names
    fn sort_names(&self, modules: &[Module]) -> Result<Vec<String>> {
        Ok(self
            .sort_refs(modules)?
            .into_iter()
            .map(|m| m.name().to_string())
            .collect())
    }
}

/// Kahn's-algorithm sorter.
///
/// Holds nothing but its tie-break policy, so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultModuleSorter {
    tie_break: TieBreak,
}

impl DefaultModuleSorter {
    /// Create a sorter that keeps input order among ready modules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sorter with an explicit tie-break policy
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Create a sorter from configuration
    pub fn from_config(config: &SorterConfig) -> Self {
        Self::with_tie_break(config.tie_break)
    }

    /// The tie-break policy in use
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Compute the order as indices into `modules`
    pub fn order(&self, modules: &[Module]) -> Result<Vec<usize>> {
        let graph = DependencyGraph::build(modules)?;
        let mut remaining = graph.in_degree.clone();
        let mut ready = ReadyQueue::new(self.tie_break);

        for (index, &degree) in remaining.iter().enumerate() {
            if degree == 0 {
                ready.push(index, modules[index].name());
            }
        }

        let mut order = Vec::with_capacity(modules.len());
        while let Some(index) = ready.pop() {
            order.push(index);

            for &dependent in &graph.dependents[index] {
                remaining[dependent] -= 1;
                if remaining[dependent] == 0 {
                    ready.push(dependent, modules[dependent].name());
                }
            }
        }

        if order.len() == modules.len() {
            debug!("Ordered {} modules", order.len());
            return Ok(order);
        }

        let error = graph.cycle_error(modules, &remaining);
        debug!(
            "Unable to order {} of {} modules: {}",
            modules.len() - order.len(),
            modules.len(),
            error
        );
        Err(error)
    }
}

impl ModuleSorter for DefaultModuleSorter {
    fn sort_modules(&self, modules: Vec<Module>) -> Result<Vec<Module>> {
        let order = self.order(&modules)?;
        let mut slots: Vec<Option<Module>> = modules.into_iter().map(Some).collect();

        // `order` is a permutation of the indices, so every slot is taken once
        Ok(order
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect())
    }

    fn sort_refs<'a>(&self, modules: &'a [Module]) -> Result<Vec<&'a Module>> {
        Ok(self
            .order(modules)?
            .into_iter()
            .map(|index| &modules[index])
            .collect())
    }
}

/// Per-call dependency graph over module indices
struct DependencyGraph {
    /// Distinct internal dependencies of each module
    requires: Vec<Vec<usize>>,
    /// Modules that depend on each module
    dependents: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl DependencyGraph {
    fn build(modules: &[Module]) -> Result<Self> {
        let mut lookup = FxHashMap::default();
        for (index, module) in modules.iter().enumerate() {
            if lookup.insert(module.name(), index).is_some() {
                return Err(SortError::DuplicateModule {
                    name: module.name().to_string(),
                });
            }
        }

        let mut requires = vec![Vec::new(); modules.len()];
        let mut dependents = vec![Vec::new(); modules.len()];
        let mut in_degree = vec![0; modules.len()];

        for (index, module) in modules.iter().enumerate() {
            let mut seen = FxHashSet::default();
            for dep in module.dependencies() {
                match lookup.get(dep.as_str()) {
                    Some(&dep_index) => {
                        if seen.insert(dep_index) {
                            requires[index].push(dep_index);
                            dependents[dep_index].push(index);
                            in_degree[index] += 1;
                        }
                    }
                    None => trace!("{}: ignoring undeclared dependency {}", module.name(), dep),
                }
            }
        }

        Ok(Self {
            requires,
            dependents,
            in_degree,
        })
    }

    /// Describe the modules left with unmet dependencies.
    ///
    /// Every leftover module has at least one leftover dependency, so
    /// following those links from any leftover module must revisit one.
    fn cycle_error(&self, modules: &[Module], remaining: &[usize]) -> SortError {
        let unresolved: Vec<usize> = (0..modules.len())
            .filter(|&index| remaining[index] > 0)
            .collect();

        let mut path = Vec::new();
        let mut position = FxHashMap::default();
        let mut current = unresolved.first().copied();

        while let Some(index) = current {
            if let Some(&start) = position.get(&index) {
                path.drain(..start);
                path.push(index);
                break;
            }
            position.insert(index, path.len());
            path.push(index);
            current = self.requires[index]
                .iter()
                .copied()
                .find(|&dep| remaining[dep] > 0);
        }

        SortError::CircularDependency {
            cycle: path
                .iter()
                .map(|&index| modules[index].name())
                .collect::<Vec<_>>()
                .join(" -> "),
            unresolved: unresolved
                .iter()
                .map(|&index| modules[index].name().to_string())
                .collect(),
        }
    }
}

/// Modules whose dependencies are all placed
enum ReadyQueue<'a> {
    InputOrder(BinaryHeap<Reverse<usize>>),
    Lexical(BinaryHeap<Reverse<(&'a str, usize)>>),
}

impl<'a> ReadyQueue<'a> {
    fn new(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::InputOrder => ReadyQueue::InputOrder(BinaryHeap::new()),
            TieBreak::Lexical => ReadyQueue::Lexical(BinaryHeap::new()),
        }
    }

    fn push(&mut self, index: usize, name: &'a str) {
        match self {
            ReadyQueue::InputOrder(heap) => heap.push(Reverse(index)),
            ReadyQueue::Lexical(heap) => heap.push(Reverse((name, index))),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self {
            ReadyQueue::InputOrder(heap) => heap.pop().map(|Reverse(index)| index),
            ReadyQueue::Lexical(heap) => heap.pop().map(|Reverse((_, index))| index),
        }
    }
}

//! Resolution session state for avoiding redundant walks.

use std::collections::HashSet;

use neuron_core::module::PackageId;

/// Tracks which packages have been walked during resolution
/// to prevent infinite loops in circular dependency chains.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<PackageId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a package as visited. Returns `false` if already visited.
    pub fn visit(&mut self, package: &PackageId) -> bool {
        self.visited.insert(package.clone())
    }

    pub fn contains(&self, package: &PackageId) -> bool {
        self.visited.contains(package)
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

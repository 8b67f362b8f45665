//! Depth-first walk over the dependency tree.
//!
//! Starting from the requested entries, every reachable `name@version` is
//! visited once. While walking, an ordered list is maintained in which every
//! package sits before its dependencies: a node is appended on first visit,
//! a new dependency is appended after it, and an already-listed dependency
//! that sits at or before its dependent is swapped with it. Reversing the
//! list at the end yields the load order, dependencies first.
//!
//! The swap rule alone can leave a dependency's own dependencies behind it,
//! so for an acyclic graph the walk order is finally settled by a post-order
//! pass over the resolved graph, which keeps the walk order wherever it is
//! already valid. Cycles terminate through the visited set; the order
//! produced for a cyclic graph is deterministic but not a topological order.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use neuron_core::module::PackageId;
use neuron_core::tree::DependencyTree;

use crate::cache::VisitedSet;
use crate::graph::ResolvedGraph;
use crate::ordered::UniqueOrderedList;

/// Resolved versions per package name, in load order.
pub type PackageVersionMap = IndexMap<String, IndexSet<String>>;

/// The output of one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Every package version required, grouped by name.
    pub packages: PackageVersionMap,
    /// Duplicate-free load order, dependencies before dependents.
    pub order: Vec<PackageId>,
    pub graph: ResolvedGraph,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of `package` in the load order.
    pub fn position(&self, package: &PackageId) -> Option<usize> {
        self.order.iter().position(|p| p == package)
    }
}

/// Resolve the transitive dependencies of `entries` against `tree`.
///
/// Entries are always recorded, even when the tree does not list them.
/// Dependencies whose name the tree does not list are skipped. A package
/// the tree does not describe resolves with no dependencies.
pub fn resolve(entries: &[PackageId], tree: &DependencyTree) -> Resolution {
    let mut walk = Walk {
        tree,
        visited: VisitedSet::new(),
        sequence: UniqueOrderedList::new(),
        graph: ResolvedGraph::new(),
    };

    for entry in entries {
        if !tree.contains(&entry.name) {
            debug!("entry {entry} is not in the dependency tree, loading it without dependencies");
        }
        let idx = walk.graph.add_node(entry.clone());
        walk.graph.mark_entry(idx);
        walk.visit(entry);
    }

    let Walk { sequence, graph, .. } = walk;
    let walked = sequence.into_reversed();

    let order = if graph.has_cycle() {
        warn!("dependency cycle detected; load order is not guaranteed for the cycle members");
        walked
    } else {
        graph.dependency_first(&walked)
    };

    debug!(
        "resolved {} package(s) from {} entry point(s)",
        order.len(),
        entries.len()
    );

    Resolution {
        packages: group_by_name(&order),
        order,
        graph,
    }
}

/// Group a load order into `name -> versions`, keeping first-seen order.
pub fn group_by_name(order: &[PackageId]) -> PackageVersionMap {
    let mut packages = PackageVersionMap::new();
    for package in order {
        packages
            .entry(package.name.clone())
            .or_default()
            .insert(package.version.clone());
    }
    packages
}

/// Mutable state of a single resolution pass.
struct Walk<'a> {
    tree: &'a DependencyTree,
    visited: VisitedSet,
    sequence: UniqueOrderedList<PackageId>,
    graph: ResolvedGraph,
}

impl Walk<'_> {
    fn visit(&mut self, package: &PackageId) {
        if !self.visited.visit(package) {
            return;
        }

        self.sequence.push(package.clone());
        let node = self.graph.add_node(package.clone());

        let tree = self.tree;
        for (name, version) in tree.dependencies(&package.name, &package.version) {
            if !tree.contains(name) {
                trace!("{package} -> {name}@{version}: not in tree, skipping");
                continue;
            }

            let dep = PackageId::new(name, version);
            let dep_node = self.graph.add_node(dep.clone());
            self.graph.add_edge(node, dep_node);

            match (self.sequence.position(&dep), self.sequence.position(package)) {
                (None, _) => {
                    trace!("{package} -> {dep}: appended");
                    self.sequence.push(dep.clone());
                }
                (Some(dep_pos), Some(pos)) if dep_pos <= pos => {
                    trace!("{package} -> {dep}: swapped {dep_pos} <-> {pos}");
                    self.sequence.swap(dep_pos, pos);
                }
                _ => {}
            }

            self.visit(&dep);
        }
    }
}

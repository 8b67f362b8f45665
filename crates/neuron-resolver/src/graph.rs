//! Resolved dependency graph construction and rendering.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{DfsPostOrder, EdgeRef};
use petgraph::Direction;

use neuron_core::module::PackageId;

/// Client-side dependency graph: `name@version -> { dep name -> dep version }`.
pub type GraphConfig = IndexMap<String, IndexMap<String, String>>;

/// The packages reached by a walk and the edges between them.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    graph: DiGraph<PackageId, ()>,
    index: HashMap<PackageId, NodeIndex>,
    entries: Vec<NodeIndex>,
}

impl ResolvedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or retrieve a node. If the package already exists, returns the existing index.
    pub fn add_node(&mut self, package: PackageId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&package) {
            return idx;
        }
        let idx = self.graph.add_node(package.clone());
        self.index.insert(package, idx);
        idx
    }

    /// Record `idx` as one of the requested entry points.
    pub fn mark_entry(&mut self, idx: NodeIndex) {
        if !self.entries.contains(&idx) {
            self.entries.push(idx);
        }
    }

    /// Add a dependency edge from `from` to `to`.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn find(&self, package: &PackageId) -> Option<NodeIndex> {
        self.index.get(package).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &PackageId {
        &self.graph[idx]
    }

    pub fn entries(&self) -> impl Iterator<Item = &PackageId> {
        self.entries.iter().map(|&idx| &self.graph[idx])
    }

    /// Direct dependencies of a node, in the order they were discovered.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields outgoing edges newest first
        let mut deps: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        deps.reverse();
        deps
    }

    /// Packages that depend directly on this node.
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut deps: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        deps.reverse();
        deps
    }

    /// Whether any dependency cycle was walked.
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Reorder `walked` so every package follows its dependencies.
    ///
    /// Dependencies are emitted post-order from each package in turn, so a
    /// `walked` sequence that is already dependencies-first comes back
    /// unchanged. Packages unknown to the graph are dropped.
    pub fn dependency_first(&self, walked: &[PackageId]) -> Vec<PackageId> {
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut dfs = DfsPostOrder::empty(&self.graph);
        for idx in walked.iter().filter_map(|package| self.find(package)) {
            dfs.move_to(idx);
            while let Some(done) = dfs.next(&self.graph) {
                order.push(self.graph[done].clone());
            }
        }
        order
    }

    /// Render the `graph` payload for the client loader, keyed in `order`.
    pub fn to_config(&self, order: &[PackageId]) -> GraphConfig {
        order
            .iter()
            .filter_map(|package| self.find(package))
            .map(|idx| {
                let deps = self
                    .dependencies_of(idx)
                    .into_iter()
                    .map(|dep| {
                        let dep = &self.graph[dep];
                        (dep.name.clone(), dep.version.clone())
                    })
                    .collect();
                (self.graph[idx].to_string(), deps)
            })
            .collect()
    }

    /// Print the dependency tree below each entry point.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        let mut visited = HashSet::new();

        for &entry in &self.entries {
            output.push_str(&format!("{}\n", self.graph[entry]));
            visited.insert(entry);

            let deps = self.dependencies_of(entry);
            let count = deps.len();
            for (i, child) in deps.into_iter().enumerate() {
                let is_last = i == count - 1;
                self.print_subtree(&mut output, child, "", is_last, 1, max_depth, &mut visited);
            }

            visited.remove(&entry);
        }

        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];

        // Already on the current path: a cycle.
        if !visited.insert(idx) {
            output.push_str(&format!("{prefix}{connector}{node} (*)\n"));
            return;
        }
        output.push_str(&format!("{prefix}{connector}{node}\n"));

        let within_depth = max_depth.map_or(true, |max| depth < max);
        if within_depth {
            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            let deps = self.dependencies_of(idx);
            let count = deps.len();
            for (i, child) in deps.into_iter().enumerate() {
                let is_last = i == count - 1;
                self.print_subtree(
                    output,
                    child,
                    &child_prefix,
                    is_last,
                    depth + 1,
                    max_depth,
                    visited,
                );
            }
        }

        visited.remove(&idx);
    }

    /// Number of resolved packages.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

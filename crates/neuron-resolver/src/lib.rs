//! Dependency resolution for neuron: a depth-first walk over the static
//! dependency tree producing a duplicate-free load order, and combo
//! selection over the resolved package set.

pub mod cache;
pub mod combo;
pub mod graph;
pub mod ordered;
pub mod walker;

//! Core data types for neuron.
//!
//! This crate defines the data the resolver and renderer operate on:
//! package and module identifiers, the static dependency tree, and the
//! `Neuron.toml` configuration.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod module;
pub mod tree;

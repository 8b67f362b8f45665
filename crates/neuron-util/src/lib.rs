//! Shared utilities for neuron.
//!
//! This crate provides cross-cutting concerns used by all other neuron crates:
//! the unified error type, short content hashing for cache keys, and
//! filesystem helpers for locating and reading input files.

pub mod errors;
pub mod fs;
pub mod hash;

//! CLI argument definitions for neuron.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "neuron",
    version,
    about = "Resolve page entry modules and render their script tags",
    long_about = "neuron walks a static dependency tree from the facades of a page, \
                  computes a load order, and renders the script tags and loader \
                  configuration needed to run them in a browser."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to Neuron.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the dependency tree JSON (overrides the config)
    #[arg(long, global = true)]
    pub tree: Option<PathBuf>,
}

/// Facades requested on the command line.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Facade module ids, e.g. `home` or `home@1.0.0/index.js`
    pub facades: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render script tags and the loader block
    Render {
        #[command(flatten)]
        page: PageArgs,
        /// Packages to serve as one request, comma-separated (repeatable)
        #[arg(long, value_name = "PACKAGES")]
        combo: Vec<String>,
        /// Render in debug mode (no pre-emitted scripts, pretty JSON)
        #[arg(long)]
        debug: bool,
    },

    /// Display the resolved dependency tree
    Tree {
        #[command(flatten)]
        page: PageArgs,
        /// Maximum display depth
        #[arg(short, long)]
        depth: Option<usize>,
        /// Print the flat load order instead
        #[arg(long)]
        order: bool,
    },

    /// Print the output cache key
    Hash {
        #[command(flatten)]
        page: PageArgs,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

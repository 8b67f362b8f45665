//! Command dispatch and handler modules.

mod hash;
mod render;
mod tree;

use std::path::PathBuf;

use miette::Result;

use neuron_ops::project::{PageOptions, ProjectOptions};
use neuron_util::errors::NeuronError;

use crate::cli::{Cli, Command, PageArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let project = ProjectOptions {
        config: cli.config,
        tree: cli.tree,
    };
    match cli.command {
        Command::Render { page, combo, debug } => render::exec(project, page, &combo, debug),
        Command::Tree { page, depth, order } => tree::exec(project, page, depth, order),
        Command::Hash { page } => hash::exec(project, page),
    }
}

fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir().map_err(NeuronError::Io)?)
}

fn page_options(page: PageArgs) -> PageOptions {
    PageOptions {
        facades: page.facades,
        ..PageOptions::default()
    }
}

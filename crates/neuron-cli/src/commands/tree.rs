//! Handler for `neuron tree`.

use miette::Result;

use neuron_ops::ops_tree::{self, TreeOptions};
use neuron_ops::project::ProjectOptions;

use crate::cli::PageArgs;

pub fn exec(project: ProjectOptions, page: PageArgs, depth: Option<usize>, order: bool) -> Result<()> {
    let cwd = super::current_dir()?;

    let opts = TreeOptions {
        project,
        page: super::page_options(page),
        depth,
        order,
    };

    print!("{}", ops_tree::tree(&cwd, &opts)?);
    Ok(())
}

//! Handler for `neuron hash`.

use miette::Result;

use neuron_ops::ops_hash;
use neuron_ops::project::ProjectOptions;

use crate::cli::PageArgs;

pub fn exec(project: ProjectOptions, page: PageArgs) -> Result<()> {
    let cwd = super::current_dir()?;
    let key = ops_hash::hash(&cwd, &project, &super::page_options(page))?;
    println!("{key}");
    Ok(())
}

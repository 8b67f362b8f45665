//! Handler for `neuron render`.

use miette::Result;

use neuron_ops::ops_render::{self, RenderOptions};
use neuron_ops::project::ProjectOptions;

use crate::cli::PageArgs;

pub fn exec(project: ProjectOptions, page: PageArgs, combos: &[String], debug: bool) -> Result<()> {
    let cwd = super::current_dir()?;

    let mut page = super::page_options(page);
    page.debug = debug;
    page.combos = combos
        .iter()
        .map(|c| {
            c.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect();

    let output = ops_render::render(&cwd, &RenderOptions { project, page })?;
    println!("{output}");
    Ok(())
}

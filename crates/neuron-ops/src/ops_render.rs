//! Operation: render the page markup.

use std::path::Path;

use crate::project::{PageOptions, Project, ProjectOptions};

/// Options for `neuron render`.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub project: ProjectOptions,
    pub page: PageOptions,
}

/// Render the script tags and loader block for the requested facades.
pub fn render(cwd: &Path, opts: &RenderOptions) -> miette::Result<String> {
    let project = Project::load(cwd, &opts.project)?;
    let mut neuron = project.session(&opts.page)?;
    Ok(neuron.output()?)
}

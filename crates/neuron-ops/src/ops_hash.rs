//! Operation: print the output cache key of a page.

use std::path::Path;

use crate::project::{PageOptions, Project, ProjectOptions};

/// Cache key for the facades configured and requested.
pub fn hash(cwd: &Path, project: &ProjectOptions, page: &PageOptions) -> miette::Result<String> {
    let project = Project::load(cwd, project)?;
    let neuron = project.session(page)?;
    Ok(neuron.cache_key())
}

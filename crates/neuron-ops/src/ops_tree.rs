//! Operation: display the resolved dependency tree.

use std::path::Path;

use crate::project::{PageOptions, Project, ProjectOptions};

/// Options for `neuron tree`.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub project: ProjectOptions,
    pub page: PageOptions,
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Print the flat load order instead of the tree.
    pub order: bool,
}

/// Resolve the facades and render the result as a tree or a load order.
pub fn tree(cwd: &Path, opts: &TreeOptions) -> miette::Result<String> {
    let project = Project::load(cwd, &opts.project)?;
    let neuron = project.session(&opts.page)?;
    let resolution = neuron.resolve();

    if resolution.is_empty() {
        return Ok("No packages resolved.\n".to_string());
    }

    if opts.order {
        let mut output = String::new();
        for package in &resolution.order {
            output.push_str(&format!("{package}\n"));
        }
        return Ok(output);
    }

    let mut output = resolution.graph.print_tree(opts.depth);
    if resolution.graph.has_cycle() {
        output.push_str("\n(*) dependency cycle\n");
    }
    Ok(output)
}

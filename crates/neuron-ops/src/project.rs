//! Loading a project's configuration and dependency tree from disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use neuron_core::config::NeuronConfig;
use neuron_core::tree::DependencyTree;
use neuron_render::{Neuron, PrefixResolver};
use neuron_util::fs::resolve_relative;

/// Where to find the project inputs. Unset fields are discovered.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Explicit `Neuron.toml`.
    pub config: Option<PathBuf>,
    /// Explicit dependency tree, overriding the config's `tree`.
    pub tree: Option<PathBuf>,
}

/// The page facades and combos requested on top of the config.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub facades: Vec<String>,
    pub combos: Vec<Vec<String>>,
    pub debug: bool,
}

/// A loaded project: config, the directory it is rooted in, and its tree.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: NeuronConfig,
    pub root: PathBuf,
    pub tree: Arc<DependencyTree>,
}

impl Project {
    /// Load the config (explicit or discovered from `cwd`) and its tree.
    pub fn load(cwd: &Path, opts: &ProjectOptions) -> miette::Result<Self> {
        let (config, root) = match &opts.config {
            Some(path) => {
                let path = resolve_relative(cwd, path);
                let config = NeuronConfig::from_path(&path)?;
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf());
                (config, root)
            }
            None => NeuronConfig::discover(cwd)?,
        };

        let tree_path = match &opts.tree {
            Some(path) => resolve_relative(cwd, path),
            None => config.tree_path(&root),
        };
        let tree = DependencyTree::from_path(&tree_path)?;

        Ok(Self {
            config,
            root,
            tree: Arc::new(tree),
        })
    }

    /// Build a session with the config's facades and combos, then `page`'s.
    pub fn session(&self, page: &PageOptions) -> miette::Result<Neuron> {
        let mut neuron = Neuron::new(Arc::clone(&self.tree))
            .with_debug(self.config.debug || page.debug)
            .with_js_config(self.config.js.clone());

        if let Some(version) = &self.config.version {
            neuron = neuron.with_version(version.clone());
        }
        if let Some(resolve) = &self.config.resolve {
            neuron = neuron.with_resolver(PrefixResolver::from(resolve));
        }

        for facade in &self.config.facades {
            neuron.facade(&facade.id, facade.data_json()?)?;
        }
        for id in &page.facades {
            neuron.facade(id, None)?;
        }

        for combo in self.config.combos.iter().chain(&page.combos) {
            neuron.combo(combo)?;
        }

        tracing::debug!(
            "session with {} facade(s), {} combo(s)",
            neuron.facades().len(),
            neuron.combos().len()
        );
        Ok(neuron)
    }
}

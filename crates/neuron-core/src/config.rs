use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use neuron_util::errors::NeuronError;

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "Neuron.toml";

/// Project configuration loaded from `Neuron.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronConfig {
    /// Dependency tree document, relative to the config file.
    #[serde(default = "default_tree_path")]
    pub tree: PathBuf,

    /// Cache version stamp; overrides the tree's `_version`.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub resolve: Option<ResolveConfig>,

    #[serde(default)]
    pub js: JsConfig,

    #[serde(default)]
    pub combos: Vec<Vec<String>>,

    #[serde(default, rename = "facade")]
    pub facades: Vec<FacadeEntry>,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            tree: default_tree_path(),
            version: None,
            debug: false,
            resolve: None,
            js: JsConfig::default(),
            combos: Vec::new(),
            facades: Vec::new(),
        }
    }
}

fn default_tree_path() -> PathBuf {
    PathBuf::from("dependency.json")
}

/// URL layout from `[resolve]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_combo_prefix", rename = "combo-prefix")]
    pub combo_prefix: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            combo_prefix: default_combo_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "/mod".to_string()
}

fn default_combo_prefix() -> String {
    "/concat".to_string()
}

/// Client-side loader options passed through verbatim from `[js]`.
///
/// Values are JavaScript expressions, not JSON strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsConfig {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub resolve: Option<String>,
}

/// A facade declared in `[[facade]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacadeEntry {
    pub id: String,
    #[serde(default)]
    pub data: Option<toml::Value>,
}

impl FacadeEntry {
    /// The facade data as JSON, if any.
    pub fn data_json(&self) -> Result<Option<serde_json::Value>, NeuronError> {
        self.data
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| NeuronError::Config {
                message: format!("facade '{}' has unsupported data: {e}", self.id),
            })
    }
}

impl NeuronConfig {
    /// Load and parse a `Neuron.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NeuronError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content).map_err(Into::into)
    }

    pub fn parse(content: &str) -> Result<Self, NeuronError> {
        toml::from_str(content).map_err(|e| NeuronError::Config {
            message: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })
    }

    /// Find `Neuron.toml` in `start` or one of its ancestors and load it.
    ///
    /// Returns the config together with the directory it was found in, or
    /// defaults rooted at `start` when no config exists.
    pub fn discover(start: &Path) -> miette::Result<(Self, PathBuf)> {
        match neuron_util::fs::find_ancestor_with(start, CONFIG_FILE) {
            Some(dir) => {
                let config = Self::from_path(&dir.join(CONFIG_FILE))?;
                tracing::debug!("using {}", dir.join(CONFIG_FILE).display());
                Ok((config, dir))
            }
            None => Ok((Self::default(), start.to_path_buf())),
        }
    }

    /// Absolute location of the dependency tree for a config rooted at `base`.
    pub fn tree_path(&self, base: &Path) -> PathBuf {
        neuron_util::fs::resolve_relative(base, &self.tree)
    }
}

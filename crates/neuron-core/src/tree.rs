//! The static dependency tree: `name -> version -> { dependencies }`.
//!
//! Document order is preserved at every level so that the walker visits
//! dependencies in the order the manifest lists them.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use neuron_util::errors::NeuronError;

use crate::module::WILDCARD_VERSION;

/// Reserved top-level key carrying the build/version stamp.
pub const VERSION_STAMP_KEY: &str = "_version";

/// The record stored for one version of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    #[serde(default, deserialize_with = "deserialize_dependencies")]
    pub dependencies: IndexMap<String, String>,
}

/// Accepts a missing/`null` block and `null` or empty versions, which mean `*`.
fn deserialize_dependencies<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, version)| {
            let version = version
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| WILDCARD_VERSION.to_string());
            (name, version)
        })
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VersionStamp {
    Text(String),
    Number(serde_json::Number),
}

/// Read-only dependency metadata for every known package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTree {
    packages: IndexMap<String, IndexMap<String, PackageEntry>>,
    version_stamp: Option<String>,
}

impl DependencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON dependency tree document.
    pub fn from_json_str(content: &str) -> Result<Self, NeuronError> {
        serde_json::from_str(content).map_err(|e| NeuronError::Tree {
            message: e.to_string(),
        })
    }

    /// Load and parse a JSON dependency tree from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = neuron_util::fs::read_to_string(path)?;
        let tree: Self = serde_json::from_str(&content).map_err(|e| NeuronError::Tree {
            message: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!(
            "loaded dependency tree {} ({} packages)",
            path.display(),
            tree.len()
        );
        Ok(tree)
    }

    /// Add (or replace) one version of a package.
    pub fn insert<I, N, V>(&mut self, name: &str, version: &str, dependencies: I)
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let entry = PackageEntry {
            dependencies: dependencies
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        };
        self.packages
            .entry(name.to_string())
            .or_default()
            .insert(version.to_string(), entry);
    }

    /// Builder form of [`DependencyTree::insert`].
    pub fn with_package<I, N, V>(mut self, name: &str, version: &str, dependencies: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.insert(name, version, dependencies);
        self
    }

    pub fn set_version_stamp(&mut self, stamp: impl Into<String>) {
        self.version_stamp = Some(stamp.into());
    }

    /// The `_version` stamp of the document, if any.
    pub fn version_stamp(&self) -> Option<&str> {
        self.version_stamp.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn get(&self, name: &str, version: &str) -> Option<&PackageEntry> {
        self.packages.get(name)?.get(version)
    }

    /// Declared dependencies of `name@version`, in document order.
    ///
    /// Unknown packages and versions have no dependencies.
    pub fn dependencies(&self, name: &str, version: &str) -> impl Iterator<Item = (&str, &str)> {
        self.get(name, version)
            .into_iter()
            .flat_map(|entry| entry.dependencies.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<'de> Deserialize<'de> for DependencyTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = DependencyTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of package name to versions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tree = DependencyTree::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == VERSION_STAMP_KEY {
                        tree.version_stamp = match map.next_value::<Option<VersionStamp>>()? {
                            Some(VersionStamp::Text(s)) => Some(s),
                            Some(VersionStamp::Number(n)) => Some(n.to_string()),
                            None => None,
                        };
                    } else {
                        let versions: IndexMap<String, PackageEntry> = map.next_value()?;
                        tree.packages.insert(key, versions);
                    }
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}

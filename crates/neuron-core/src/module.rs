//! Package and module identifiers.
//!
//! A package id is `name@version`; a module id adds an in-package path,
//! `name@version/path`. The version `*` is the wildcard.

use std::fmt;
use std::str::FromStr;

use neuron_util::errors::NeuronError;

/// The "any version" sentinel, also the default when a version is omitted.
pub const WILDCARD_VERSION: &str = "*";

/// Format a package id: `("jquery", "1.0.0")` -> `jquery@1.0.0`.
pub fn package_id(name: &str, version: &str) -> String {
    format!("{name}@{version}")
}

/// Format a module id.
///
/// An empty or `/` path points at the package main file:
/// `("jquery", "*", "")` -> `jquery@*/jquery.js`.
pub fn module_id(name: &str, version: &str, path: &str) -> String {
    if path.is_empty() || path == "/" {
        format!("{}/{name}.js", package_id(name, version))
    } else {
        format!("{}{path}", package_id(name, version))
    }
}

/// A resolved package: name plus exact (or wildcard) version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    pub name: String,
    pub version: String,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.version == WILDCARD_VERSION
    }

    /// Module id of this package's main file.
    pub fn main_module(&self) -> String {
        module_id(&self.name, &self.version, "")
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A parsed `name[@version][/path]` token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    pub name: String,
    pub version: String,
    /// Empty when the token names the package main file.
    pub path: String,
}

impl ModuleId {
    /// Parse a module id token.
    ///
    /// Never fails for a non-empty token: a missing version becomes `*` and
    /// a missing (or `/`) path becomes empty.
    pub fn parse(token: &str) -> Result<Self, NeuronError> {
        if token.is_empty() {
            return Err(NeuronError::InvalidInput {
                message: "module id cannot be empty".to_string(),
            });
        }

        let (head, path) = match token.find('/') {
            Some(i) => token.split_at(i),
            None => (token, ""),
        };

        if head.is_empty() {
            return Ok(Self {
                name: token.to_string(),
                version: WILDCARD_VERSION.to_string(),
                path: String::new(),
            });
        }

        // The name is the shortest prefix leaving `@<non-empty version>`.
        let split = head
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '@')
            .map(|(i, _)| i)
            .filter(|&i| i + 1 < head.len());

        let (name, version) = match split {
            Some(i) => (&head[..i], &head[i + 1..]),
            None => (head, WILDCARD_VERSION),
        };

        let path = if path == "/" { "" } else { path };

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            path: path.to_string(),
        })
    }

    pub fn package(&self) -> PackageId {
        PackageId::new(self.name.clone(), self.version.clone())
    }
}

impl FromStr for ModuleId {
    type Err = NeuronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&module_id(&self.name, &self.version, &self.path))
    }
}

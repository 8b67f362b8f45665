//! Combo selection: assigning resolved packages to caller-declared bundles.
//!
//! Combos are processed in declaration order and consume the packages they
//! select, so a package is never bundled twice and anything no combo claims
//! is emitted on its own.

use tracing::{debug, trace};

use neuron_core::module::{ModuleId, PackageId, WILDCARD_VERSION};

use crate::walker::PackageVersionMap;

/// One unit of emitted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Several packages served by a single concatenated request.
    Bundle(Vec<PackageId>),
    /// A package served on its own.
    Single(PackageId),
}

impl Emission {
    pub fn packages(&self) -> &[PackageId] {
        match self {
            Emission::Bundle(packages) => packages,
            Emission::Single(package) => std::slice::from_ref(package),
        }
    }
}

/// Resolved packages split into combo emissions and leftovers.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Non-empty combos in declaration order; one-package combos are `Single`.
    pub combos: Vec<Emission>,
    /// Packages no combo selected.
    pub remaining: PackageVersionMap,
}

impl Partition {
    /// All emissions: combos first, then each remaining package on its own.
    pub fn emissions(&self) -> Vec<Emission> {
        let singles = self.remaining.iter().flat_map(|(name, versions)| {
            versions
                .iter()
                .map(move |version| Emission::Single(PackageId::new(name.clone(), version.clone())))
        });
        self.combos.iter().cloned().chain(singles).collect()
    }

    /// Every emitted package id, in emission order.
    pub fn loaded(&self) -> Vec<PackageId> {
        self.emissions()
            .iter()
            .flat_map(|e| e.packages().iter().cloned())
            .collect()
    }
}

/// Partition `resolved` using the combo declarations.
///
/// A token naming a package that is not (or no longer) in the set is
/// dropped. A wildcard token takes every remaining version of its package.
pub fn partition(mut resolved: PackageVersionMap, combos: &[Vec<ModuleId>]) -> Partition {
    let mut emitted = Vec::new();

    for combo in combos {
        let selected = select(&mut resolved, combo);
        match selected.len() {
            0 => debug!("combo {} selects nothing, dropped", describe(combo)),
            1 => {
                trace!("combo {} collapses to a single package", describe(combo));
                emitted.extend(selected.into_iter().map(Emission::Single));
            }
            _ => emitted.push(Emission::Bundle(selected)),
        }
    }

    Partition {
        combos: emitted,
        remaining: resolved,
    }
}

fn select(resolved: &mut PackageVersionMap, combo: &[ModuleId]) -> Vec<PackageId> {
    let mut selected = Vec::new();

    for token in combo {
        let Some(versions) = resolved.get_mut(&token.name) else {
            trace!("combo token {token}: not resolved or already taken");
            continue;
        };

        if token.version == WILDCARD_VERSION {
            selected.extend(
                versions
                    .iter()
                    .map(|v| PackageId::new(token.name.clone(), v.clone())),
            );
            resolved.shift_remove(&token.name);
            continue;
        }

        if !versions.shift_remove(&token.version) {
            trace!("combo token {token}: version not resolved");
            continue;
        }
        selected.push(token.package());
        if versions.is_empty() {
            resolved.shift_remove(&token.name);
        }
    }

    selected
}

fn describe(combo: &[ModuleId]) -> String {
    let names: Vec<String> = combo.iter().map(|m| m.package().to_string()).collect();
    format!("[{}]", names.join(", "))
}

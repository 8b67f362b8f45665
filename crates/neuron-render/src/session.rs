//! The page session facade.
//!
//! A [`Neuron`] session starts open: facades and combos accumulate until the
//! first [`Neuron::output`] call renders the page and freezes the session.
//! Registrations after that point are ignored, since the page has already
//! been produced.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use neuron_core::config::JsConfig;
use neuron_core::module::{ModuleId, PackageId};
use neuron_core::tree::DependencyTree;
use neuron_resolver::combo::{self, Emission};
use neuron_resolver::graph::GraphConfig;
use neuron_resolver::walker::{self, Resolution};
use neuron_util::errors::NeuronError;
use neuron_util::hash::short_hash;

use crate::asset::{AssetEmitter, AssetKind};
use crate::cache::OutputCache;
use crate::debug::DebugMode;
use crate::resolve::{DefaultResolver, Resource, UrlResolver};

/// Module id of the client-side loader.
pub const LOADER_MODULE: &str = "neuron.js";

/// Version stamp used when neither the caller nor the tree provides one.
pub const DEFAULT_VERSION: &str = "0";

/// An entry module activated on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Facade {
    /// The id exactly as registered.
    pub id: String,
    pub module: ModuleId,
    pub data: Option<Value>,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting facade and combo registrations.
    Open,
    /// Output has been produced; registrations are ignored.
    Rendered,
}

/// Collects the modules of one page and renders their markup.
pub struct Neuron {
    tree: Arc<DependencyTree>,
    emitter: AssetEmitter,
    debug: DebugMode,
    version: String,
    cache: Option<Arc<dyn OutputCache>>,
    js_config: JsConfig,
    facades: Vec<Facade>,
    combos: Vec<Vec<ModuleId>>,
    state: SessionState,
}

impl Neuron {
    pub fn new(tree: impl Into<Arc<DependencyTree>>) -> Self {
        let tree = tree.into();
        let version = tree.version_stamp().unwrap_or(DEFAULT_VERSION).to_string();
        Self {
            tree,
            emitter: AssetEmitter::new(DefaultResolver),
            debug: DebugMode::default(),
            version,
            cache: None,
            js_config: JsConfig::default(),
            facades: Vec::new(),
            combos: Vec::new(),
            state: SessionState::Open,
        }
    }

    pub fn with_resolver(mut self, resolver: impl UrlResolver + 'static) -> Self {
        self.emitter = AssetEmitter::new(resolver);
        self
    }

    pub fn with_debug(mut self, debug: impl Into<DebugMode>) -> Self {
        self.debug = debug.into();
        self
    }

    /// Override the version stamp mixed into the cache key.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn OutputCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_js_config(mut self, js_config: JsConfig) -> Self {
        self.js_config = js_config;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn facades(&self) -> &[Facade] {
        &self.facades
    }

    pub fn combos(&self) -> &[Vec<ModuleId>] {
        &self.combos
    }

    fn accepts_registration(&self, what: &str) -> bool {
        match self.state {
            SessionState::Open => true,
            SessionState::Rendered => {
                warn!("{what} registered after output was rendered; ignored");
                false
            }
        }
    }

    /// Register an entry module, optionally with data passed to it on activation.
    pub fn facade(&mut self, id: &str, data: Option<Value>) -> Result<(), NeuronError> {
        if !self.accepts_registration("facade") {
            return Ok(());
        }
        let module = ModuleId::parse(id)?;
        self.facades.push(Facade {
            id: id.to_string(),
            module,
            data,
        });
        Ok(())
    }

    /// Declare packages that should be served by a single request.
    ///
    /// Ignored in debug mode and for fewer than two tokens.
    pub fn combo<I, S>(&mut self, tokens: I) -> Result<(), NeuronError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.accepts_registration("combo") {
            return Ok(());
        }
        let tokens = tokens
            .into_iter()
            .map(|t| ModuleId::parse(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if self.debug.evaluate() {
            debug!("combos are disabled in debug mode");
            return Ok(());
        }
        if tokens.len() < 2 {
            debug!("combo with {} package(s) ignored", tokens.len());
            return Ok(());
        }
        self.combos.push(tokens);
        Ok(())
    }

    /// Cache key over the sorted facade ids and the version stamp.
    ///
    /// Debug mode and combos are not part of the key. Sessions that share a
    /// cache must agree on both, or a page rendered in one mode is served to
    /// the other. A [`DebugMode::Dynamic`] session should not share a cache.
    pub fn cache_key(&self) -> String {
        let mut ids: Vec<&str> = self.facades.iter().map(|f| f.id.as_str()).collect();
        ids.sort_unstable();
        short_hash(format!("neuron:{}:{}", self.version, ids.join(",")).as_bytes())
    }

    /// Resolve the registered facades against the dependency tree.
    pub fn resolve(&self) -> Resolution {
        let entries: Vec<PackageId> = self.facades.iter().map(|f| f.module.package()).collect();
        walker::resolve(&entries, &self.tree)
    }

    /// Render the page, freezing the session.
    ///
    /// With a cache configured and at least one facade, the output is looked
    /// up by [`Neuron::cache_key`] and stored on a miss.
    pub fn output(&mut self) -> Result<String, NeuronError> {
        self.state = SessionState::Rendered;
        let debug = self.debug.evaluate();

        let cache = match &self.cache {
            Some(cache) if !self.facades.is_empty() => Some(Arc::clone(cache)),
            _ => None,
        };

        let Some(cache) = cache else {
            return self.render(debug);
        };

        let key = self.cache_key();
        if cache.has(&key) {
            if let Some(hit) = cache.get(&key) {
                debug!("output cache hit for {key}");
                return Ok(hit);
            }
        }

        let rendered = self.render(debug)?;
        cache.save(&key, &rendered);
        debug!("output cached as {key}");
        Ok(rendered)
    }

    fn render(&self, debug: bool) -> Result<String, NeuronError> {
        let resolution = self.resolve();
        let graph = resolution.graph.to_config(&resolution.order);

        if debug {
            let parts = [
                self.output_loader(),
                "<script>".to_string(),
                self.output_config(&[], &graph, true)?,
                self.output_facades(true)?,
                "</script>".to_string(),
            ];
            return Ok(parts.join("\n"));
        }

        let partition = combo::partition(resolution.packages, &self.combos);
        let emissions = partition.emissions();
        let loaded: Vec<PackageId> = emissions
            .iter()
            .flat_map(|e| e.packages().iter().cloned())
            .collect();

        let parts = [
            self.output_loader(),
            self.output_scripts(&emissions),
            "<script>".to_string(),
            self.output_config(&loaded, &graph, false)?,
            self.output_facades(false)?,
            "</script>".to_string(),
        ];
        Ok(parts.concat())
    }

    fn output_loader(&self) -> String {
        self.emitter
            .emit(Resource::Module(LOADER_MODULE), AssetKind::Js, "")
    }

    fn output_scripts(&self, emissions: &[Emission]) -> String {
        emissions
            .iter()
            .map(|emission| match emission {
                Emission::Single(package) => self.emitter.emit(
                    Resource::Module(&package.main_module()),
                    AssetKind::Js,
                    "async",
                ),
                Emission::Bundle(packages) => {
                    let ids: Vec<String> = packages.iter().map(PackageId::main_module).collect();
                    self.emitter
                        .emit(Resource::Combo(&ids), AssetKind::Js, "async")
                }
            })
            .collect()
    }

    fn output_config(
        &self,
        loaded: &[PackageId],
        graph: &GraphConfig,
        debug: bool,
    ) -> Result<String, NeuronError> {
        let loaded: Vec<String> = loaded.iter().map(PackageId::to_string).collect();
        let mut pairs = vec![
            format!("loaded:{}", to_json(&loaded, debug)?),
            format!("graph:{}", to_json(graph, debug)?),
        ];
        if let Some(path) = self.js_config.path.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("path:{path}"));
        }
        if let Some(resolve) = self.js_config.resolve.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("resolve:{resolve}"));
        }
        Ok(format!("neuron.config({{{}}});", pairs.join(",")))
    }

    fn output_facades(&self, debug: bool) -> Result<String, NeuronError> {
        let calls = self
            .facades
            .iter()
            .map(|facade| -> Result<String, NeuronError> {
                let data = match &facade.data {
                    None | Some(Value::Null) => String::new(),
                    Some(data) => format!(", {}", to_json(data, debug)?),
                };
                Ok(format!("facade('{}'{data});", escape_single_quoted(&facade.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(calls.join("\n"))
    }
}

impl fmt::Debug for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neuron")
            .field("state", &self.state)
            .field("version", &self.version)
            .field("debug", &self.debug)
            .field("facades", &self.facades)
            .field("combos", &self.combos)
            .finish_non_exhaustive()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, NeuronError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| NeuronError::Generic {
        message: format!("Failed to serialize loader config: {e}"),
    })
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

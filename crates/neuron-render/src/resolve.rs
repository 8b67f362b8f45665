//! Module id to URL resolution.

use neuron_core::config::ResolveConfig;

/// What a URL is being requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    /// A single module id, e.g. `a@1.0.0/a.js`.
    Module(&'a str),
    /// Several module ids served by one concatenating request.
    Combo(&'a [String]),
}

/// Maps module ids to URLs. Implemented for plain closures.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, resource: Resource<'_>) -> String;
}

impl<F> UrlResolver for F
where
    F: Fn(Resource<'_>) -> String + Send + Sync,
{
    fn resolve(&self, resource: Resource<'_>) -> String {
        self(resource)
    }
}

/// `/<id>` for modules and `/<id>,<id>` for combos.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl UrlResolver for DefaultResolver {
    fn resolve(&self, resource: Resource<'_>) -> String {
        match resource {
            Resource::Module(id) => format!("/{id}"),
            Resource::Combo(ids) => format!("/{}", ids.join(",")),
        }
    }
}

/// Serves modules from `<prefix>/<name>/<version>/<path>` and combos from
/// `<combo_prefix><url>,<url>` with `/` in each module URL replaced by `~`.
#[derive(Debug, Clone)]
pub struct PrefixResolver {
    pub prefix: String,
    pub combo_prefix: String,
}

impl PrefixResolver {
    pub fn new(prefix: impl Into<String>, combo_prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            combo_prefix: combo_prefix.into(),
        }
    }

    fn module_url(&self, id: &str) -> String {
        format!("{}/{}", self.prefix, id.replace('@', "/"))
    }
}

impl From<&ResolveConfig> for PrefixResolver {
    fn from(config: &ResolveConfig) -> Self {
        Self::new(config.prefix.clone(), config.combo_prefix.clone())
    }
}

impl UrlResolver for PrefixResolver {
    fn resolve(&self, resource: Resource<'_>) -> String {
        match resource {
            Resource::Module(id) => self.module_url(id),
            Resource::Combo(ids) => {
                let parts: Vec<String> = ids
                    .iter()
                    .map(|id| self.module_url(id).replace('/', "~"))
                    .collect();
                format!("{}{}", self.combo_prefix, parts.join(","))
            }
        }
    }
}

//! Asset tags.

use std::fmt;
use std::str::FromStr;

use crate::resolve::{Resource, UrlResolver};

/// The kind of tag an asset is emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Js,
    Css,
    Other,
}

impl FromStr for AssetKind {
    type Err = std::convert::Infallible;

    /// `js` and `css` are recognised; anything else is [`AssetKind::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "js" => AssetKind::Js,
            "css" => AssetKind::Css,
            _ => AssetKind::Other,
        })
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Js => "js",
            AssetKind::Css => "css",
            AssetKind::Other => "other",
        })
    }
}

/// Wrap `url` in the tag for `kind`. `extra` is inserted as attributes.
pub fn decorate(url: &str, kind: AssetKind, extra: &str) -> String {
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!(" {extra}")
    };
    match kind {
        AssetKind::Js => format!("<script{extra} src=\"{url}\"></script>"),
        AssetKind::Css => format!("<link{extra} rel=\"stylesheet\" href=\"{url}\">"),
        AssetKind::Other => format!("<img{extra} alt=\"\" src=\"{url}\"/>"),
    }
}

/// Turns module ids into tags through a URL resolver.
pub struct AssetEmitter {
    resolver: Box<dyn UrlResolver>,
}

impl AssetEmitter {
    pub fn new(resolver: impl UrlResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }

    pub fn url(&self, resource: Resource<'_>) -> String {
        self.resolver.resolve(resource)
    }

    pub fn emit(&self, resource: Resource<'_>, kind: AssetKind, extra: &str) -> String {
        decorate(&self.url(resource), kind, extra)
    }
}

impl fmt::Debug for AssetEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetEmitter").finish_non_exhaustive()
    }
}

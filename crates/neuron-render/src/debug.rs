use std::fmt;

/// Whether a page renders in debug mode, fixed or decided per render.
pub enum DebugMode {
    Static(bool),
    Dynamic(Box<dyn Fn() -> bool + Send + Sync>),
}

impl DebugMode {
    pub fn dynamic(f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        DebugMode::Dynamic(Box::new(f))
    }

    pub fn evaluate(&self) -> bool {
        match self {
            DebugMode::Static(debug) => *debug,
            DebugMode::Dynamic(f) => f(),
        }
    }
}

impl Default for DebugMode {
    fn default() -> Self {
        DebugMode::Static(false)
    }
}

impl From<bool> for DebugMode {
    fn from(debug: bool) -> Self {
        DebugMode::Static(debug)
    }
}

impl fmt::Debug for DebugMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugMode::Static(debug) => f.debug_tuple("Static").field(debug).finish(),
            DebugMode::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

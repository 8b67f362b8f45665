use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all neuron operations.
#[derive(Debug, Error, Diagnostic)]
pub enum NeuronError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed dependency tree document.
    #[error("Dependency tree error: {message}")]
    #[diagnostic(help("The dependency tree must map package name -> version -> dependencies"))]
    Tree { message: String },

    /// Invalid or malformed configuration (e.g. Neuron.toml).
    #[error("Config error: {message}")]
    #[diagnostic(help("Check your Neuron.toml for syntax errors"))]
    Config { message: String },

    /// Input rejected at the boundary, such as an empty module id.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type NeuronResult<T> = miette::Result<T>;

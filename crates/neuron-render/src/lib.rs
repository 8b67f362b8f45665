//! Markup rendering for neuron.
//!
//! [`session::Neuron`] collects the facades and combos of one page, resolves
//! them with `neuron-resolver`, and renders the script tags plus the inline
//! loader configuration.

pub mod asset;
pub mod cache;
pub mod debug;
pub mod resolve;
pub mod session;

pub use cache::{MemoryCache, OutputCache};
pub use debug::DebugMode;
pub use resolve::{DefaultResolver, PrefixResolver, Resource, UrlResolver};
pub use session::{Facade, Neuron};

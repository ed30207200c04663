//! # modalias-config
//!
//! Plugin options for the module alias rewriter and their normalization.
//!
//! The host compiler hands over raw options (see [`PluginOptions`]); they are
//! normalized once per file into a [`NormalizedConfig`] that the resolver
//! consumes. Normalization is the only place that reads the filesystem.

pub mod discovery;
pub mod env;
pub mod error;
pub mod normalize;
pub mod options;
pub mod roots;

pub use discovery::ProjectConfigDiscovery;
pub use env::Environment;
pub use error::*;
pub use normalize::{
    AliasSpec, DEFAULT_EXTENSIONS, LiteralTarget, NPM_PREFIX, NormalizedConfig, is_pattern_key,
    normalize,
};
pub use options::{CwdOption, ExposeEntry, ExtendedOptions, PluginOptions};

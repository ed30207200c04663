//! # modalias-resolver
//!
//! The alias resolution engine: an immutable [`AliasTable`] of literal and
//! pattern aliases, and a [`Resolver`] that maps a bare module specifier to a
//! relative path (or external package name) from the importing file.
//!
//! ## Matching rules
//!
//! 1. Literal keys are matched against the specifier's `/`-separated prefix,
//!    longest first. `utils/sub/file` resolves through a `utils` alias with
//!    `/sub/file` carried over.
//! 2. When no literal prefix matches, pattern aliases are tried in
//!    configuration order; the first match's template (`\1`, `\2`, ...) gives
//!    the target.
//! 3. Targets marked `npm:` are returned as package names; everything else is
//!    made relative to the importing file's directory, with `/` separators.
//!
//! ```text
//!  specifier ──► AliasTable::lookup ──► AliasMatch ──► to_relative ──► Resolution
//!                 (literal walk,                       (or package
//!                  then patterns)                        name as-is)
//! ```

pub mod path;
pub mod resolver;
pub mod table;
pub mod template;

pub use path::{absolutize, is_relative_reference, to_posix, to_relative};
pub use resolver::{Resolution, Resolver};
pub use table::{AliasMatch, AliasTable, PatternAlias};
pub use template::{Template, TemplateToken};

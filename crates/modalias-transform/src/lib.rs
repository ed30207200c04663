//! # modalias-transform
//!
//! Source-level glue between a JavaScript/TypeScript file and the alias
//! resolver. The file is parsed with the OXC parser, every module specifier
//! in `import`/`export ... from`, dynamic `import()` and `require()` is
//! offered to the [`Resolver`], and replacements are spliced back into the
//! original text.
//!
//! ## Quick Start
//!
//! ```rust
//! use modalias_config::Environment;
//! use modalias_transform::transform_source;
//! use serde_json::json;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = json!([{ "src": "./src/mylib/subfolder/utils", "expose": "utils" }]);
//! let env = Environment::new("/project");
//!
//! let output = transform_source(
//!     r#"var utils = require("utils");"#,
//!     Path::new("./index.js"),
//!     &options,
//!     &env,
//! )?;
//! assert_eq!(output.code, r#"var utils = require("./src/mylib/subfolder/utils");"#);
//! # Ok(())
//! # }
//! ```

pub mod collect;
pub mod error;
pub mod rewrite;

use std::path::Path;

use modalias_config::{Environment, PluginOptions, normalize};
use serde_json::Value;

pub use collect::{Delimiter, SpecifierCollector, SpecifierKind, SpecifierSite};
pub use error::{Result, TransformError};
pub use modalias_resolver::{Resolution, Resolver};
pub use rewrite::{Rewrite, TransformOutput, Transformer, is_bare_specifier};

/// Transform one file from raw plugin options.
///
/// Builds the alias table for this file only: options are parsed and
/// normalized, the table is compiled, the file is rewritten and everything is
/// dropped afterwards. A configuration error aborts the whole file.
pub fn transform_source(
    source: &str,
    filename: &Path,
    options: &Value,
    env: &Environment,
) -> Result<TransformOutput> {
    let options = PluginOptions::from_value(options)?;
    let config = normalize(&options, Some(filename), env)?;
    let resolver = Resolver::from_config(&config, env)?;
    Transformer::new(resolver).transform(source, filename)
}

//! Specifier resolution: table lookup, substitution and relativization.

use std::fmt;
use std::path::{Path, PathBuf};

use modalias_config::{Environment, LiteralTarget, NormalizedConfig, Result};

use crate::path::{absolutize, to_relative};
use crate::table::{AliasMatch, AliasTable};

/// Result of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No alias applies; leave the specifier untouched.
    NoMatch,
    /// Substitute this specifier.
    Replacement(String),
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Replacement(_))
    }

    pub fn replacement(&self) -> Option<&str> {
        match self {
            Resolution::Replacement(s) => Some(s),
            Resolution::NoMatch => None,
        }
    }

    pub fn into_replacement(self) -> Option<String> {
        match self {
            Resolution::Replacement(s) => Some(s),
            Resolution::NoMatch => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::NoMatch => write!(f, "NoMatch"),
            Resolution::Replacement(s) => write!(f, "Replacement({})", s),
        }
    }
}

/// Resolves bare module specifiers through an [`AliasTable`].
///
/// All paths are anchored to the explicit `cwd` and `working_dir` given at
/// construction; nothing reads the process working directory or the disk.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: AliasTable,
    /// Base for relative pattern expansions.
    cwd: PathBuf,
    /// Base for relative importing-file paths.
    working_dir: PathBuf,
}

impl Resolver {
    pub fn new(table: AliasTable, cwd: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            table,
            cwd: cwd.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Build the table for `config` and anchor it to `env`.
    pub fn from_config(config: &NormalizedConfig, env: &Environment) -> Result<Self> {
        let table = AliasTable::build(config)?;
        Ok(Self::new(table, config.cwd.clone(), env.working_dir()))
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Resolve `specifier` as written in `current_file`.
    ///
    /// Callers only pass bare specifiers; `./x` and `/x` are left to the host.
    ///
    /// # Example
    ///
    /// ```
    /// use modalias_config::{normalize, Environment, PluginOptions};
    /// use modalias_resolver::{Resolution, Resolver};
    /// use serde_json::json;
    /// use std::path::Path;
    ///
    /// let env = Environment::new("/project");
    /// let options = PluginOptions::from_value(&json!([
    ///     { "src": "./src/mylib/subfolder/utils", "expose": "utils" }
    /// ]))
    /// .unwrap();
    /// let config = normalize(&options, None, &env).unwrap();
    /// let resolver = Resolver::from_config(&config, &env).unwrap();
    ///
    /// assert_eq!(
    ///     resolver.resolve("utils/my-util-file", Path::new("./index.js")),
    ///     Resolution::Replacement("./src/mylib/subfolder/utils/my-util-file".to_string())
    /// );
    /// assert_eq!(resolver.resolve("lodash", Path::new("./index.js")), Resolution::NoMatch);
    /// ```
    pub fn resolve(&self, specifier: &str, current_file: &Path) -> Resolution {
        let Some(found) = self.table.lookup(specifier) else {
            tracing::trace!("No alias for {specifier}");
            return Resolution::NoMatch;
        };

        let resolved = match found {
            AliasMatch::Literal { key, target, rest } => {
                let rest = if key.is_empty() {
                    format!("/{rest}")
                } else {
                    rest.to_string()
                };
                match target {
                    LiteralTarget::Package(name) => format!("{name}{rest}"),
                    LiteralTarget::Path(path) => {
                        let mut raw = path.clone().into_os_string();
                        raw.push(&rest);
                        to_relative(&self.working_dir, current_file, Path::new(&raw))
                    }
                }
            }
            AliasMatch::Pattern {
                expanded,
                external: true,
            } => expanded,
            AliasMatch::Pattern {
                expanded,
                external: false,
            } => {
                let raw = absolutize(&self.cwd, Path::new(&expanded));
                to_relative(&self.working_dir, current_file, &raw)
            }
        };

        let resolved = keep_trailing_slash(specifier, resolved);
        tracing::trace!("Resolved {specifier} -> {resolved}");
        Resolution::Replacement(resolved)
    }
}

/// Path cleaning drops trailing separators; a specifier like `utils/` (the
/// literal head of a concatenation) must keep its slash.
fn keep_trailing_slash(specifier: &str, mut resolved: String) -> String {
    if specifier.ends_with('/') && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved
}

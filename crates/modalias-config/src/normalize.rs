//! Normalization of raw plugin options into an immutable [`NormalizedConfig`].
//!
//! All filesystem access of the system happens here, once per file transform:
//! project-config discovery for the `cwd` sentinel, root glob expansion and
//! the root probe for literal targets. The result is plain data, so alias
//! matching later on never needs to touch the disk.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;

use crate::discovery::ProjectConfigDiscovery;
use crate::env::Environment;
use crate::error::Result;
use crate::options::{CwdOption, ExtendedOptions, PluginOptions};
use crate::roots::expand_roots;

/// Marker on an alias value meaning "external package name, not a path".
pub const NPM_PREFIX: &str = "npm:";

/// Extensions used when the options don't name any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".es", ".es6"];

/// Where a literal alias points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralTarget {
    /// Absolute filesystem path.
    Path(PathBuf),
    /// Bare package name, emitted without relativization.
    Package(String),
}

/// One classified alias entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasSpec {
    Literal {
        key: String,
        target: LiteralTarget,
    },
    Pattern {
        pattern: String,
        template: String,
        external: bool,
    },
}

impl AliasSpec {
    pub fn key(&self) -> &str {
        match self {
            AliasSpec::Literal { key, .. } => key,
            AliasSpec::Pattern { pattern, .. } => pattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedConfig {
    /// Absolute base directory.
    pub cwd: PathBuf,
    /// Absolute root directories, globs already expanded.
    pub roots: Vec<PathBuf>,
    /// Literal entries first, then patterns, each group in configuration order.
    pub aliases: Vec<AliasSpec>,
    pub extensions: Vec<String>,
}

impl NormalizedConfig {
    /// Whether `path` carries one of the configured source extensions.
    pub fn has_source_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|configured| configured.trim_start_matches('.') == ext)
    }

    pub fn literals(&self) -> impl Iterator<Item = (&str, &LiteralTarget)> {
        self.aliases.iter().filter_map(|spec| match spec {
            AliasSpec::Literal { key, target } => Some((key.as_str(), target)),
            AliasSpec::Pattern { .. } => None,
        })
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, &str, bool)> {
        self.aliases.iter().filter_map(|spec| match spec {
            AliasSpec::Pattern {
                pattern,
                template,
                external,
            } => Some((pattern.as_str(), template.as_str(), *external)),
            AliasSpec::Literal { .. } => None,
        })
    }
}

/// A key is a pattern when it is anchored at either end.
pub fn is_pattern_key(key: &str) -> bool {
    key.starts_with('^') || key.ends_with('$')
}

/// Normalize options for the file at `filename`.
///
/// `filename` is only used to find the project config when `cwd` asks for it;
/// pass `None` when the host doesn't know the file name.
///
/// # Example
///
/// ```
/// use modalias_config::{normalize, Environment, LiteralTarget, PluginOptions};
/// use serde_json::json;
/// use std::path::PathBuf;
///
/// let options = PluginOptions::from_value(&json!([
///     { "expose": "utils", "src": "./src/utils" }
/// ]))
/// .unwrap();
/// let config = normalize(&options, None, &Environment::new("/project")).unwrap();
///
/// let (key, target) = config.literals().next().unwrap();
/// assert_eq!(key, "utils");
/// assert_eq!(target, &LiteralTarget::Path(PathBuf::from("/project/src/utils")));
/// ```
pub fn normalize(
    options: &PluginOptions,
    filename: Option<&Path>,
    env: &Environment,
) -> Result<NormalizedConfig> {
    match options {
        PluginOptions::Simple(entries) => {
            let cwd = env.working_dir().to_path_buf();
            let extensions = default_extensions();
            let mut literals = IndexMap::new();
            let mut warned = false;
            for entry in entries {
                let target = literal_target(&entry.src, &cwd, &[], &extensions, &mut warned);
                literals.insert(normalize_key(&entry.expose), target);
            }
            Ok(NormalizedConfig {
                cwd,
                roots: Vec::new(),
                aliases: into_specs(literals, Vec::new()),
                extensions,
            })
        }
        PluginOptions::Extended(ext) => normalize_extended(ext, filename, env),
    }
}

fn normalize_extended(
    ext: &ExtendedOptions,
    filename: Option<&Path>,
    env: &Environment,
) -> Result<NormalizedConfig> {
    // cwd first: roots and literal targets hang off it
    let cwd = normalize_cwd(ext.cwd.as_ref(), filename, env);
    let roots = expand_roots(&cwd, &ext.root)?;
    let extensions = ext.extensions.clone().unwrap_or_else(default_extensions);

    let mut warned = false;
    let mut literals = IndexMap::new();
    let mut patterns = Vec::new();

    for (key, value) in &ext.alias {
        if is_pattern_key(key) {
            let (template, external) = strip_npm_prefix(value, &mut warned);
            patterns.push(AliasSpec::Pattern {
                pattern: key.clone(),
                template: template.to_string(),
                external,
            });
        } else {
            let target = literal_target(value, &cwd, &roots, &extensions, &mut warned);
            literals.insert(normalize_key(key), target);
        }
    }

    tracing::debug!(
        "Normalized {} literal and {} pattern aliases (cwd: {}, roots: {})",
        literals.len(),
        patterns.len(),
        cwd.display(),
        roots.len()
    );

    Ok(NormalizedConfig {
        cwd,
        roots,
        aliases: into_specs(literals, patterns),
        extensions,
    })
}

fn normalize_cwd(cwd: Option<&CwdOption>, filename: Option<&Path>, env: &Environment) -> PathBuf {
    match cwd {
        Some(CwdOption::Path(path)) => env.resolve(path),
        Some(CwdOption::ProjectConfig) => {
            let start = match filename {
                Some(file) => env
                    .resolve(file)
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| env.working_dir().to_path_buf()),
                None => env.working_dir().to_path_buf(),
            };
            match ProjectConfigDiscovery::new(&start).find_dir() {
                Some(dir) => dir,
                None => {
                    tracing::debug!(
                        "No project config found above {}, using working directory",
                        start.display()
                    );
                    env.working_dir().to_path_buf()
                }
            }
        }
        None => env.working_dir().to_path_buf(),
    }
}

fn literal_target(
    value: &str,
    cwd: &Path,
    roots: &[PathBuf],
    extensions: &[String],
    warned: &mut bool,
) -> LiteralTarget {
    let (value, external) = strip_npm_prefix(value, warned);
    if external {
        return LiteralTarget::Package(value.to_string());
    }

    let path = Path::new(value);
    if path.is_absolute() {
        return LiteralTarget::Path(path.clean());
    }

    let base = match roots {
        [] => cwd,
        [first, ..] => roots
            .iter()
            .find(|root| target_exists(&root.join(path), extensions))
            .unwrap_or(first)
            .as_path(),
    };
    LiteralTarget::Path(base.join(path).clean())
}

fn target_exists(candidate: &Path, extensions: &[String]) -> bool {
    if candidate.exists() {
        return true;
    }
    let raw = candidate.as_os_str().to_string_lossy();
    extensions
        .iter()
        .any(|ext| Path::new(&format!("{raw}{ext}")).is_file())
}

fn strip_npm_prefix<'v>(value: &'v str, warned: &mut bool) -> (&'v str, bool) {
    match value.strip_prefix(NPM_PREFIX) {
        Some(name) => {
            if !*warned {
                *warned = true;
                tracing::warn!(
                    "The \"npm:\" prefix in an alias is deprecated and will be removed in the next major version release."
                );
            }
            (name, true)
        }
        None => (value, false),
    }
}

fn normalize_key(key: &str) -> String {
    key.trim_end_matches('/').to_string()
}

fn into_specs(literals: IndexMap<String, LiteralTarget>, patterns: Vec<AliasSpec>) -> Vec<AliasSpec> {
    literals
        .into_iter()
        .map(|(key, target)| AliasSpec::Literal { key, target })
        .chain(patterns)
        .collect()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

//! Project config discovery for the `cwd: "fromProjectConfig"` option.
//!
//! Walks up from a start directory looking for the host compiler's config file.
//! Only the location is of interest; the file's contents are never loaded.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Config file names checked in each directory, in order.
pub const PROJECT_CONFIG_FILES: &[&str] = &[
    ".babelrc",
    ".babelrc.json",
    ".babelrc.js",
    ".babelrc.cjs",
    ".babelrc.mjs",
    "babel.config.js",
    "babel.config.json",
    "babel.config.cjs",
    "babel.config.mjs",
];

/// `package.json` field that makes a package manifest count as a project config.
pub const PACKAGE_JSON_FIELD: &str = "babel";

/// Nearest-ancestor project config lookup.
///
/// # Example
///
/// ```no_run
/// use modalias_config::ProjectConfigDiscovery;
///
/// let discovery = ProjectConfigDiscovery::new("src/components");
/// if let Some(dir) = discovery.find_dir() {
///     println!("project root: {}", dir.display());
/// }
/// ```
pub struct ProjectConfigDiscovery {
    start: PathBuf,
}

impl ProjectConfigDiscovery {
    /// Create a discovery rooted at `start` (a directory).
    pub fn new(start: impl AsRef<Path>) -> Self {
        Self {
            start: start.as_ref().to_path_buf(),
        }
    }

    /// Find the nearest config file in `start` or any of its ancestors.
    ///
    /// In each directory the dedicated config files win over a
    /// `package.json` carrying a `babel` field.
    pub fn find(&self) -> Option<PathBuf> {
        self.start.ancestors().find_map(find_in_dir)
    }

    /// Directory containing the nearest config file.
    pub fn find_dir(&self) -> Option<PathBuf> {
        self.find()
            .and_then(|path| path.parent().map(Path::to_path_buf))
    }
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    for name in PROJECT_CONFIG_FILES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let pkg_path = dir.join("package.json");
    if pkg_path.is_file() && package_json_has_config(&pkg_path) {
        return Some(pkg_path);
    }

    None
}

fn package_json_has_config(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(parsed) => parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null()),
        Err(e) => {
            tracing::debug!("Ignoring unparsable {}: {}", path.display(), e);
            false
        }
    }
}

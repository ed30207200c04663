//! Eager expansion of `root` entries into existing directories.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{ConfigError, Result};

/// Whether a path contains glob metacharacters.
pub fn has_magic(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Resolve root entries against `cwd`, expanding glob patterns.
///
/// Plain entries are kept whether or not they exist. Glob entries expand to
/// the matching paths that are directories (not following symlinks), in the
/// order the glob walker yields them.
pub fn expand_roots(cwd: &Path, roots: &[String]) -> Result<Vec<PathBuf>> {
    let mut expanded = Vec::with_capacity(roots.len());

    for root in roots {
        let abs = cwd.join(root).clean();
        let pattern = abs.to_string_lossy().into_owned();

        if !has_magic(&pattern) {
            expanded.push(abs);
            continue;
        }

        let paths = glob::glob(&pattern).map_err(|e| ConfigError::InvalidRootPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        let before = expanded.len();
        for entry in paths {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                ConfigError::RootExpansion {
                    path,
                    source: e.into(),
                }
            })?;

            let metadata = fs::symlink_metadata(&path).map_err(|source| {
                ConfigError::RootExpansion {
                    path: path.clone(),
                    source,
                }
            })?;
            if metadata.is_dir() {
                expanded.push(path);
            }
        }

        tracing::debug!(
            "Expanded root pattern {} into {} directories",
            pattern,
            expanded.len() - before
        );
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn magic_detection() {
        assert!(has_magic("./packages/*"));
        assert!(has_magic("./src/?"));
        assert!(has_magic("./[ab]"));
        assert!(!has_magic("./src/lib"));
    }

    #[test]
    fn plain_roots_resolve_against_cwd() {
        let roots = expand_roots(Path::new("/project"), &["./src".to_string(), "/abs".to_string()])
            .unwrap();
        assert_eq!(roots, [PathBuf::from("/project/src"), PathBuf::from("/abs")]);
    }

    #[test]
    fn glob_roots_keep_only_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("packages/a")).unwrap();
        fs::create_dir_all(dir.path().join("packages/b")).unwrap();
        fs::write(dir.path().join("packages/readme.md"), "").unwrap();

        let roots = expand_roots(dir.path(), &["./packages/*".to_string()]).unwrap();
        assert_eq!(
            roots,
            [dir.path().join("packages/a"), dir.path().join("packages/b")]
        );
    }

    #[test]
    fn invalid_glob_is_a_config_error() {
        let err = expand_roots(Path::new("/project"), &["./src/[".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRootPattern { .. }));
    }
}

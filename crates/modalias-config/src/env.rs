//! The effective working directory resolution is anchored to.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::Result;

/// Explicit working-directory context.
///
/// Built once by the caller and threaded through normalization and
/// resolution, so that later changes to the process working directory do not
/// affect results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    working_dir: PathBuf,
}

impl Environment {
    /// Use an explicit working directory. Relative paths are taken as-is.
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().clean(),
        }
    }

    /// Detect the working directory the user invoked the host with.
    ///
    /// Prefers `PWD` (the shell's directory at invocation, unaffected by
    /// `chdir` inside the process) and falls back to the process working
    /// directory.
    pub fn detect() -> Result<Self> {
        if let Some(pwd) = std::env::var_os("PWD") {
            let pwd = PathBuf::from(pwd);
            if pwd.is_absolute() {
                tracing::trace!("Using PWD as working directory: {}", pwd.display());
                return Ok(Self::new(pwd));
            }
        }

        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve `path` against the working directory (absolute paths pass through).
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.clean()
        } else {
            self.working_dir.join(path).clean()
        }
    }
}

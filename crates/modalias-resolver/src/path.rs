//! Relative-path computation for rewritten specifiers.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use path_clean::PathClean;

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        base.join(path).clean()
    }
}

/// Path of `target` relative to the directory containing `from_file`, as a
/// POSIX-style relative module specifier.
///
/// Both inputs are resolved against `working_dir` first. The result always
/// reads as a relative reference (`./x`, `../x`), since a bare `x` would be
/// looked up as a package. Dot-files are prefixed too, so `.hidden/x`
/// becomes `./.hidden/x`.
///
/// # Example
///
/// ```
/// use modalias_resolver::to_relative;
/// use std::path::Path;
///
/// let rel = to_relative(Path::new("/repo/test"), Path::new("./utils/test/file.js"), Path::new("utils/dep"));
/// assert_eq!(rel, "../dep");
/// ```
pub fn to_relative(working_dir: &Path, from_file: &Path, target: &Path) -> String {
    let from_dir = from_file.parent().unwrap_or(Path::new(""));
    let from_dir = absolutize(working_dir, from_dir);
    let target = absolutize(working_dir, target);

    let relative = pathdiff::diff_paths(&target, &from_dir).unwrap_or(target);
    let relative = to_posix(&relative.to_string_lossy());

    if is_relative_reference(&relative) {
        relative
    } else {
        format!("./{relative}")
    }
}

/// Whether a specifier already reads as a relative file reference.
pub fn is_relative_reference(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Replace platform separators with `/`.
pub fn to_posix(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

//! # Path Utilities
//!
//! Thin wrappers over the host's path-metadata queries.
//!
//! Kind checks never follow symbolic links: [`file_exists`] is `false` for a
//! symlink pointing at a regular file and [`dir_exists`] is `false` for a
//! symlink pointing at a directory. Only [`file_like_exists`] follows links.
//!
//! Path resolution ([`expand_path`]) is purely lexical after expansion: the
//! result is absolute and free of `.`/`..` components, but symlinks inside it
//! are left untouched.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::{Expansion, FileKind, FsError};

/// Returns `true` if something exists at `path`, following symbolic links.
///
/// A dangling symlink does not count as existing.
pub fn file_like_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).is_ok()
}

/// Returns `true` if a regular file (not a symlink to one) exists at `path`.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_file())
}

/// Returns `true` if a directory (not a symlink to one) exists at `path`.
pub fn dir_exists(path: impl AsRef<Path>) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_dir())
}

/// Returns `true` if a symbolic link exists at `path`, dangling or not.
pub fn symlink_exists(path: impl AsRef<Path>) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Classify what lives at `path` without following symbolic links.
///
/// # Errors
///
/// - [`FsError::NothingAt`] if there is no directory, regular file or symlink at `path`
pub fn file_like_kind(path: impl AsRef<Path>) -> Result<FileKind, FsError> {
    let path = path.as_ref();
    let nothing = || FsError::NothingAt {
        path: path.to_path_buf(),
    };
    let file_type = fs::symlink_metadata(path).map_err(|_| nothing())?.file_type();

    if file_type.is_dir() {
        Ok(FileKind::Directory)
    } else if file_type.is_file() {
        Ok(FileKind::File)
    } else if file_type.is_symlink() {
        Ok(FileKind::Symlink)
    } else {
        Err(nothing())
    }
}

/// Returns `true` if `path` is absolute.
pub fn path_is_absolute(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_absolute()
}

/// Returns `true` if `path` is relative.
pub fn path_is_relative(path: impl AsRef<Path>) -> bool {
    !path_is_absolute(path)
}

/// The final component of `path`, or an empty string if there is none.
pub fn base_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The current working directory.
///
/// # Errors
///
/// - [`FsError::Io`] if the working directory cannot be determined
pub fn current_path() -> Result<PathBuf, FsError> {
    env::current_dir().map_err(|e| FsError::io("current_dir", Path::new("."), e))
}

/// Expand and absolutize `path`.
///
/// `~` and environment variables are expanded according to `expansion`;
/// the result is then joined onto the working directory if relative and
/// normalized lexically.
///
/// ```rust
/// use fluentfs::{expand_path, Expansion};
/// use std::path::Path;
///
/// let path = expand_path("/usr/./lib/../bin", Expansion::NONE).unwrap();
/// assert_eq!(path, Path::new("/usr/bin"));
/// ```
///
/// # Errors
///
/// - [`FsError::Io`] if `path` is relative and the working directory is unavailable
pub fn expand_path(path: impl AsRef<Path>, expansion: Expansion) -> Result<PathBuf, FsError> {
    let mut path = path.as_ref().to_path_buf();

    if expansion.user {
        path = expand_user(&path);
    }
    if expansion.vars {
        path = expand_vars(&path);
    }
    if path.is_relative() {
        path = current_path()?.join(path);
    }

    Ok(normalize_path(&path))
}

/// [`expand_path`] applied to every element of `paths`.
///
/// # Errors
///
/// The first error returned by [`expand_path`].
pub fn expand_paths<I>(paths: I, expansion: Expansion) -> Result<Vec<PathBuf>, FsError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| expand_path(path, expansion))
        .collect()
}

/// `path` expressed relative to `base` (the working directory if `None`).
///
/// Both paths are resolved with [`Expansion::NONE`] first, so the result is
/// computed lexically.
///
/// ```rust
/// use fluentfs::relative_path;
/// use std::path::Path;
///
/// let rel = relative_path("/a/b/c.txt", Some(Path::new("/a/d"))).unwrap();
/// assert_eq!(rel, Path::new("../b/c.txt"));
/// ```
///
/// # Errors
///
/// - [`FsError::Io`] if the working directory is needed but unavailable
pub fn relative_path(path: impl AsRef<Path>, base: Option<&Path>) -> Result<PathBuf, FsError> {
    let path = expand_path(path, Expansion::NONE)?;
    let base = match base {
        Some(base) => expand_path(base, Expansion::NONE)?,
        None => normalize_path(&current_path()?),
    };

    let path_components: Vec<Component<'_>> = path.components().collect();
    let base_components: Vec<Component<'_>> = base.components().collect();
    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

/// Replace a leading `~` (alone or followed by a separator) with `$HOME`.
fn expand_user(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Substitute `$NAME` and `${NAME}`; unknown variables are left as written.
fn expand_vars(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    if !text.contains('$') {
        return path.to_path_buf();
    }

    let is_name_char = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut expanded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(dollar) = rest.find('$') {
        expanded.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(close) => (&braced[..close], close + 2),
                None => ("", 0),
            }
        } else {
            let len = after.find(|c| !is_name_char(c)).unwrap_or(after.len());
            (&after[..len], len)
        };

        match (!name.is_empty()).then(|| env::var(name).ok()).flatten() {
            Some(value) => expanded.push_str(&value),
            None => expanded.push_str(&rest[dollar..dollar + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    expanded.push_str(rest);

    PathBuf::from(expanded)
}

/// Lexical normalization: drops `.`, applies `..`, collapses separators.
///
/// `..` never climbs above the root.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let climbable = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if climbable {
                    normalized.pop();
                } else if !at_root {
                    normalized.push("..");
                }
            }
            Component::Normal(name) => normalized.push(name),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn normalize_drops_dots() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), Path::new("/a/c"));
        assert_eq!(normalize_path(Path::new("/a//b/")), Path::new("/a/b"));
        assert_eq!(normalize_path(Path::new("/..")), Path::new("/"));
        assert_eq!(normalize_path(Path::new("/a/b/../..")), Path::new("/"));
    }

    #[test]
    fn expand_path_absolutizes_relative() {
        let cwd = current_path().unwrap();
        let expanded = expand_path("some/file.txt", Expansion::NONE).unwrap();
        assert_eq!(expanded, normalize_path(&cwd.join("some/file.txt")));
        assert!(expanded.is_absolute());
    }

    #[test]
    fn expand_path_user() {
        let Some(home) = env::var_os("HOME") else {
            return;
        };
        let expanded = expand_path("~/notes", Expansion::USER).unwrap();
        assert_eq!(expanded, normalize_path(&PathBuf::from(home).join("notes")));
    }

    #[test]
    fn expand_path_user_disabled() {
        let expanded = expand_path("/x/~", Expansion::ALL).unwrap();
        assert_eq!(expanded, Path::new("/x/~"));
        let cwd = current_path().unwrap();
        let kept = expand_path("~", Expansion::NONE).unwrap();
        assert_eq!(kept, cwd.join("~"));
    }

    #[test]
    fn expand_path_vars() {
        let Ok(home) = env::var("HOME") else {
            return;
        };
        let plain = expand_path("$HOME/a", Expansion::VARS).unwrap();
        let braced = expand_path("${HOME}/a", Expansion::VARS).unwrap();
        let expected = normalize_path(&PathBuf::from(home).join("a"));
        assert_eq!(plain, expected);
        assert_eq!(braced, expected);
    }

    #[test]
    fn expand_vars_leaves_unknown_variables() {
        let path = expand_vars(Path::new("/a/$FLUENTFS_SURELY_UNSET_VAR/b"));
        assert_eq!(path, Path::new("/a/$FLUENTFS_SURELY_UNSET_VAR/b"));
        let path = expand_vars(Path::new("/a/${unterminated"));
        assert_eq!(path, Path::new("/a/${unterminated"));
        let path = expand_vars(Path::new("/cost/$5"));
        assert_eq!(path, Path::new("/cost/$5"));
    }

    #[test]
    fn relative_path_walks_up() {
        let rel = relative_path("/a/b/c.txt", Some(Path::new("/a/d/e"))).unwrap();
        assert_eq!(rel, Path::new("../../b/c.txt"));
        let rel = relative_path("/a/b", Some(Path::new("/a/b"))).unwrap();
        assert_eq!(rel, Path::new("."));
        let rel = relative_path("/a/b/c", Some(Path::new("/a"))).unwrap();
        assert_eq!(rel, Path::new("b/c"));
    }

    #[test]
    fn base_name_of_paths() {
        assert_eq!(base_name("/a/b.txt"), "b.txt");
        assert_eq!(base_name("/"), "");
    }

    #[test]
    fn absolute_and_relative() {
        assert!(path_is_absolute("/a"));
        assert!(path_is_relative("a/b"));
    }

    #[test]
    fn kind_checks_on_real_entries() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        assert!(file_exists(&file));
        assert!(!dir_exists(&file));
        assert!(dir_exists(tmp.path()));
        assert!(file_like_exists(&file));
        assert!(!file_like_exists(tmp.path().join("missing")));
        assert_eq!(file_like_kind(&file).unwrap(), FileKind::File);
        assert_eq!(file_like_kind(tmp.path()).unwrap(), FileKind::Directory);
        assert!(matches!(
            file_like_kind(tmp.path().join("missing")),
            Err(FsError::NothingAt { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn kind_checks_do_not_follow_symlinks() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        let file_link = tmp.path().join("f.link");
        let dir_link = tmp.path().join("d.link");
        let broken = tmp.path().join("broken");
        std::os::unix::fs::symlink(&file, &file_link).unwrap();
        std::os::unix::fs::symlink(tmp.path(), &dir_link).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), &broken).unwrap();

        assert!(!file_exists(&file_link));
        assert!(!dir_exists(&dir_link));
        assert!(symlink_exists(&file_link));
        assert!(symlink_exists(&broken));
        assert!(!file_like_exists(&broken));
        assert_eq!(file_like_kind(&dir_link).unwrap(), FileKind::Symlink);
    }
}

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use super::{Entry, Location, located};
use crate::{Expansion, FileKind, FileLike, FsError, symlink_exists};

/// A symbolic link on disk, dangling or not.
#[derive(Debug, Clone)]
pub struct SymbolicLink {
    location: Location,
}

located!(SymbolicLink, FileKind::Symlink);

impl SymbolicLink {
    /// Open the symbolic link at `path`, resolved with [`Expansion::ALL`].
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no symbolic link at the resolved path
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        Self::with_expansion(path, Expansion::ALL)
    }

    /// Open the symbolic link at `path`, resolved with `expansion`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no symbolic link at the resolved path
    pub fn with_expansion(path: impl AsRef<Path>, expansion: Expansion) -> Result<Self, FsError> {
        Location::resolve(path, expansion, FileKind::Symlink).map(Self::from_location)
    }

    pub(crate) fn from_location(location: Location) -> Self {
        Self { location }
    }

    /// The immediate target of this link.
    ///
    /// For `c -> b -> a` this is `b`, which may itself be a link. A relative
    /// target is taken relative to the directory holding the link.
    ///
    /// # Errors
    ///
    /// - [`FsError::BrokenLink`] if nothing exists at the target
    /// - [`FsError::Io`] if the link cannot be read
    pub fn target(&self) -> Result<Entry, FsError> {
        let target = read_target(self.path())?;
        self.entry_at(target)
    }

    /// The first non-link entity at the end of the chain starting here.
    ///
    /// For `c -> b -> a` this is `a`.
    ///
    /// # Errors
    ///
    /// - [`FsError::BrokenLink`] if the chain ends where nothing exists
    /// - [`FsError::LinkCycle`] if the chain comes back to a link it already followed
    /// - [`FsError::Io`] if a link in the chain cannot be read
    pub fn final_target(&self) -> Result<Entry, FsError> {
        let mut visited = HashSet::new();
        let mut current = self.path().to_path_buf();

        loop {
            if !visited.insert(current.clone()) {
                return Err(FsError::LinkCycle {
                    link: self.path().to_path_buf(),
                });
            }

            let target = read_target(&current)?;
            trace!(link = %current.display(), target = %target.display(), "followed symbolic link");
            if !symlink_exists(&target) {
                return self.entry_at(target);
            }
            current = target;
        }
    }

    fn entry_at(&self, target: PathBuf) -> Result<Entry, FsError> {
        Entry::at_with(&target, Expansion::NONE).map_err(|e| match e {
            FsError::NothingAt { .. } => FsError::BrokenLink {
                link: self.path().to_path_buf(),
                target,
            },
            other => other,
        })
    }
}

/// Read the link at `link` and resolve its target against the link's directory.
///
/// `..` is applied to the real directory reached so far, as the OS does, so a
/// link found through a linked directory still resolves where it points.
fn read_target(link: &Path) -> Result<PathBuf, FsError> {
    let raw = fs::read_link(link).map_err(|e| FsError::io("read link", link, e))?;
    let mut resolved = match link.parent() {
        Some(parent) if raw.is_relative() => parent.to_path_buf(),
        _ => PathBuf::new(),
    };

    for component in raw.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Ok(real) = fs::canonicalize(&resolved) {
                    resolved = real;
                }
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

impl fmt::Display for SymbolicLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymLink(\"{}\")", self.path().display())
    }
}

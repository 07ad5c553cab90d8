//! # File-Like Entities
//!
//! Typed handles on filesystem objects:
//!
//! | Type | Exists only if the path holds |
//! |------|-------------------------------|
//! | [`Directory`] | a directory (not a symlink to one) |
//! | [`RegularFile`] | a regular file (not a symlink to one) |
//! | [`SymbolicLink`] | a symbolic link, dangling or not |
//! | [`TextFile`] | a regular file, read through an encoding |
//!
//! Each handle stores the path it was given and the path it resolves to.
//! Existence is checked once, when the handle is built; nothing is cached and
//! no file handle is kept open afterwards.
//!
//! Two entities are equal when their resolved paths are equal, whatever their
//! concrete types:
//!
//! ```rust,no_run
//! use fluentfs::{Directory, Entry, FileLike};
//!
//! let dir = Directory::new("~/projects")?;
//! assert_eq!(Entry::at("~/projects")?, dir);
//! # Ok::<(), fluentfs::FsError>(())
//! ```

mod directory;
mod regular_file;
mod symlink;
mod text_file;

pub use directory::Directory;
pub use regular_file::RegularFile;
pub use symlink::SymbolicLink;
pub use text_file::TextFile;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::{
    Expansion, FileKind, FsError, base_name, dir_exists, expand_path, file_exists, file_like_kind,
    relative_path, symlink_exists,
};

/// Capabilities shared by every file-like entity.
pub trait FileLike {
    /// Fully resolved (expanded, absolute, normalized) path.
    fn path(&self) -> &Path;

    /// Path exactly as it was passed to the constructor.
    fn given_path(&self) -> &Path;

    /// What kind of entity this is.
    fn kind(&self) -> FileKind;

    /// Last component of the resolved path.
    fn name(&self) -> String {
        base_name(self.path())
    }

    /// Resolved path relative to the current working directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the working directory is unavailable
    fn relative_path(&self) -> Result<PathBuf, FsError> {
        relative_path(self.path(), None)
    }
}

/// Given and resolved path of an entity that was found on disk.
#[derive(Debug, Clone)]
pub(crate) struct Location {
    given: PathBuf,
    resolved: PathBuf,
}

impl Location {
    /// Resolve `path` and check that an entity of `kind` lives there.
    pub(crate) fn resolve(
        path: impl AsRef<Path>,
        expansion: Expansion,
        kind: FileKind,
    ) -> Result<Self, FsError> {
        let given = path.as_ref().to_path_buf();
        let resolved = expand_path(&given, expansion)?;

        let exists = match kind {
            FileKind::File => file_exists(&resolved),
            FileKind::Directory => dir_exists(&resolved),
            FileKind::Symlink => symlink_exists(&resolved),
        };
        if !exists {
            return Err(FsError::NotFound {
                path: resolved,
                kind,
            });
        }
        Ok(Self { given, resolved })
    }

    /// Resolve `path` and find out what lives there.
    fn classify(path: impl AsRef<Path>, expansion: Expansion) -> Result<(Self, FileKind), FsError> {
        let given = path.as_ref().to_path_buf();
        let resolved = expand_path(&given, expansion)?;
        let kind = file_like_kind(&resolved)?;
        Ok((Self { given, resolved }, kind))
    }

    pub(crate) fn given(&self) -> &Path {
        &self.given
    }

    pub(crate) fn resolved(&self) -> &Path {
        &self.resolved
    }
}

/// Any entity found on disk, classified without following symbolic links.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A directory.
    Directory(Directory),
    /// A regular file.
    File(RegularFile),
    /// A symbolic link.
    Symlink(SymbolicLink),
}

impl Entry {
    /// Classify whatever lives at `path`, resolved with [`Expansion::ALL`].
    ///
    /// # Errors
    ///
    /// - [`FsError::NothingAt`] if there is no directory, regular file or symlink at `path`
    pub fn at(path: impl AsRef<Path>) -> Result<Self, FsError> {
        Self::at_with(path, Expansion::ALL)
    }

    /// Classify whatever lives at `path`, resolved with `expansion`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NothingAt`] if there is no directory, regular file or symlink at `path`
    pub fn at_with(path: impl AsRef<Path>, expansion: Expansion) -> Result<Self, FsError> {
        let (location, kind) = Location::classify(path, expansion)?;
        Ok(match kind {
            FileKind::Directory => Entry::Directory(Directory::from_location(location)),
            FileKind::File => Entry::File(RegularFile::from_location(location)),
            FileKind::Symlink => Entry::Symlink(SymbolicLink::from_location(location)),
        })
    }

    /// The directory, if this is one.
    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            Entry::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    /// The regular file, if this is one.
    pub fn as_file(&self) -> Option<&RegularFile> {
        match self {
            Entry::File(file) => Some(file),
            _ => None,
        }
    }

    /// The symbolic link, if this is one.
    pub fn as_symlink(&self) -> Option<&SymbolicLink> {
        match self {
            Entry::Symlink(link) => Some(link),
            _ => None,
        }
    }

    /// Convert into the directory, if this is one.
    pub fn into_dir(self) -> Option<Directory> {
        match self {
            Entry::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    /// Convert into the regular file, if this is one.
    pub fn into_file(self) -> Option<RegularFile> {
        match self {
            Entry::File(file) => Some(file),
            _ => None,
        }
    }

    /// Convert into the symbolic link, if this is one.
    pub fn into_symlink(self) -> Option<SymbolicLink> {
        match self {
            Entry::Symlink(link) => Some(link),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn FileLike {
        match self {
            Entry::Directory(dir) => dir,
            Entry::File(file) => file,
            Entry::Symlink(link) => link,
        }
    }
}

impl FileLike for Entry {
    fn path(&self) -> &Path {
        self.inner().path()
    }

    fn given_path(&self) -> &Path {
        self.inner().given_path()
    }

    fn kind(&self) -> FileKind {
        self.inner().kind()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Directory(dir) => fmt::Display::fmt(dir, f),
            Entry::File(file) => fmt::Display::fmt(file, f),
            Entry::Symlink(link) => fmt::Display::fmt(link, f),
        }
    }
}

impl From<Directory> for Entry {
    fn from(dir: Directory) -> Self {
        Entry::Directory(dir)
    }
}

impl From<RegularFile> for Entry {
    fn from(file: RegularFile) -> Self {
        Entry::File(file)
    }
}

impl From<SymbolicLink> for Entry {
    fn from(link: SymbolicLink) -> Self {
        Entry::Symlink(link)
    }
}

/// Implements `FileLike` for a type holding a `location` field.
macro_rules! located {
    ($ty:ty, $kind:expr) => {
        impl $crate::FileLike for $ty {
            fn path(&self) -> &::std::path::Path {
                self.location.resolved()
            }

            fn given_path(&self) -> &::std::path::Path {
                self.location.given()
            }

            fn kind(&self) -> $crate::FileKind {
                $kind
            }
        }
    };
}
pub(crate) use located;

/// Equality by resolved path between `$lhs` and each right-hand type.
macro_rules! path_eq {
    ($lhs:ty: $($rhs:ty),+) => {
        $(
            impl PartialEq<$rhs> for $lhs {
                fn eq(&self, other: &$rhs) -> bool {
                    self.path() == other.path()
                }
            }
        )+

        impl Eq for $lhs {}

        impl Hash for $lhs {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.path().hash(state);
            }
        }
    };
}

path_eq!(Directory: Directory, RegularFile, SymbolicLink, TextFile, Entry);
path_eq!(RegularFile: Directory, RegularFile, SymbolicLink, TextFile, Entry);
path_eq!(SymbolicLink: Directory, RegularFile, SymbolicLink, TextFile, Entry);
path_eq!(TextFile: Directory, RegularFile, SymbolicLink, TextFile, Entry);
path_eq!(Entry: Directory, RegularFile, SymbolicLink, TextFile, Entry);

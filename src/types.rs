//! Core types shared across fluentfs.

use std::fmt;

/// Kind of a file-like entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileKind {
    /// Regular file (never a symbolic link).
    File,
    /// Directory (never a symbolic link).
    Directory,
    /// Symbolic link.
    Symlink,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileKind::File => "regular file",
            FileKind::Directory => "directory",
            FileKind::Symlink => "symbolic link",
        })
    }
}

/// Which expansions are applied when resolving a path.
///
/// Resolution always makes the path absolute; these flags additionally
/// control `~` (home directory) and `$VAR` / `${VAR}` substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expansion {
    /// Replace a leading `~` with the home directory.
    pub user: bool,
    /// Substitute environment variables.
    pub vars: bool,
}

impl Expansion {
    /// Expand both the home directory and environment variables.
    pub const ALL: Self = Self {
        user: true,
        vars: true,
    };

    /// Only make the path absolute.
    pub const NONE: Self = Self {
        user: false,
        vars: false,
    };

    /// Only expand the home directory.
    pub const USER: Self = Self {
        user: true,
        vars: false,
    };

    /// Only substitute environment variables.
    pub const VARS: Self = Self {
        user: false,
        vars: true,
    };
}

impl Default for Expansion {
    fn default() -> Self {
        Self::ALL
    }
}

/// What a tree walk emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WalkKind {
    /// Directories and regular files.
    #[default]
    FileLikes,
    /// Regular files only.
    FilesOnly,
    /// Directories only.
    DirsOnly,
}

impl WalkKind {
    /// Returns `true` if directories are emitted.
    #[inline]
    pub const fn emits_dirs(self) -> bool {
        matches!(self, WalkKind::FileLikes | WalkKind::DirsOnly)
    }

    /// Returns `true` if regular files are emitted.
    #[inline]
    pub const fn emits_files(self) -> bool {
        matches!(self, WalkKind::FileLikes | WalkKind::FilesOnly)
    }
}

//! # Tree Walk
//!
//! [`TreeWalk`] enumerates a directory tree depth first, in a fixed order:
//!
//! ```text
//! root/            1. the directory itself
//! root/a.txt       2. its regular files, sorted by name
//! root/b.txt
//! root/sub/        3. each subdirectory in name order, recursively
//! root/sub/c.txt
//! ```
//!
//! Symbolic links are never followed and never emitted, whether they point
//! at files, directories or nothing. Entries that vanish between listing and
//! inspection are skipped. A directory that cannot be read is left out
//! together with everything below it.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::{Directory, Entry, Expansion, RegularFile, WalkKind};

/// Lazy, single-pass walk over a directory tree.
///
/// Directories are listed only as the walk reaches them.
pub struct TreeWalk {
    root: PathBuf,
    kind: WalkKind,
    inner: walkdir::IntoIter,
}

impl TreeWalk {
    /// Walk the tree below `root`, emitting what `kind` selects.
    ///
    /// `root` should already be resolved: entries are built from it verbatim.
    pub fn new(root: impl AsRef<Path>, kind: WalkKind) -> Self {
        let root = root.as_ref().to_path_buf();
        let inner = WalkDir::new(&root)
            .follow_links(false)
            .sort_by(files_before_dirs)
            .into_iter();
        Self { root, kind, inner }
    }

    /// The directory the walk started at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// What the walk emits.
    pub fn kind(&self) -> WalkKind {
        self.kind
    }
}

impl Iterator for TreeWalk {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(root = %self.root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            let file_type = entry.file_type();
            let found = if file_type.is_dir() {
                if !self.kind.emits_dirs() {
                    continue;
                }
                if let Err(err) = fs::read_dir(entry.path()) {
                    debug!(
                        path = %entry.path().display(),
                        error = %err,
                        "skipping unreadable directory"
                    );
                    self.inner.skip_current_dir();
                    continue;
                }
                Directory::with_expansion(entry.path(), Expansion::NONE).map(Entry::Directory)
            } else if file_type.is_file() {
                if !self.kind.emits_files() {
                    continue;
                }
                RegularFile::with_expansion(entry.path(), Expansion::NONE).map(Entry::File)
            } else {
                trace!(path = %entry.path().display(), "skipping symbolic link or special file");
                continue;
            };

            match found {
                Ok(found) => return Some(found),
                Err(err) => debug!(path = %entry.path().display(), error = %err, "entry vanished"),
            }
        }
    }
}

impl std::fmt::Debug for TreeWalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeWalk")
            .field("root", &self.root)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Within a directory: non-directories first, then directories, each by name.
fn files_before_dirs(a: &walkdir::DirEntry, b: &walkdir::DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

use std::fmt;
use std::path::Path;

use super::{Entry, Location, RegularFile, located};
use crate::{
    Expansion, FileIterator, FileKind, FileLike, FsError, FunctionalIterator, TreeWalk, WalkKind,
};

/// A directory on disk.
///
/// Iteration methods walk the whole tree below the directory, depth first,
/// emitting each directory before its files and its files (sorted by name)
/// before its subdirectories. Symbolic links are never followed.
#[derive(Debug, Clone)]
pub struct Directory {
    location: Location,
}

located!(Directory, FileKind::Directory);

impl Directory {
    /// Open the directory at `path`, resolved with [`Expansion::ALL`].
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no directory at the resolved path
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        Self::with_expansion(path, Expansion::ALL)
    }

    /// Open the directory at `path`, resolved with `expansion`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no directory at the resolved path
    pub fn with_expansion(path: impl AsRef<Path>, expansion: Expansion) -> Result<Self, FsError> {
        Location::resolve(path, expansion, FileKind::Directory).map(Self::from_location)
    }

    pub(crate) fn from_location(location: Location) -> Self {
        Self { location }
    }

    /// The regular file called `name` inside this directory.
    ///
    /// `name` is joined verbatim; `~` and `$VAR` in it are not expanded.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no regular file with that name
    pub fn file(&self, name: impl AsRef<Path>) -> Result<RegularFile, FsError> {
        RegularFile::with_expansion(self.path().join(name), Expansion::NONE)
    }

    /// The directory called `name` inside this directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no directory with that name
    pub fn dir(&self, name: impl AsRef<Path>) -> Result<Directory, FsError> {
        Directory::with_expansion(self.path().join(name), Expansion::NONE)
    }

    /// Walk the tree below this directory, emitting what `kind` selects.
    pub fn walk(&self, kind: WalkKind) -> TreeWalk {
        TreeWalk::new(self.path(), kind)
    }

    /// This directory, every directory and every regular file below it.
    pub fn file_likes(&self) -> FunctionalIterator<'static, Entry> {
        FunctionalIterator::new(self.walk(WalkKind::FileLikes))
    }

    /// Every regular file below this directory.
    pub fn files(&self) -> FileIterator<'static> {
        FileIterator::new(self.walk(WalkKind::FilesOnly).filter_map(Entry::into_file))
    }

    /// This directory and every directory below it.
    pub fn dirs(&self) -> FunctionalIterator<'static, Directory> {
        FunctionalIterator::new(self.walk(WalkKind::DirsOnly).filter_map(Entry::into_dir))
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dir(\"{}\")", self.path().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fluent;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/d.txt"), "d").unwrap();
        fs::write(root.join("sub/c.txt"), "c").unwrap();
        tmp
    }

    fn names(paths: Vec<PathBuf>, root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn missing_directory() {
        let tmp = fixture();
        let err = Directory::new(tmp.path().join("other_dir")).unwrap_err();
        assert!(matches!(
            err,
            FsError::NotFound {
                kind: FileKind::Directory,
                ..
            }
        ));
    }

    #[test]
    fn file_is_not_a_directory() {
        let tmp = fixture();
        assert!(Directory::new(tmp.path().join("a.txt")).is_err());
    }

    #[test]
    fn children_by_name() {
        let tmp = fixture();
        let dir = Directory::new(tmp.path()).unwrap();
        assert_eq!(dir.file("a.txt").unwrap().path(), tmp.path().join("a.txt"));
        assert_eq!(dir.dir("sub").unwrap().path(), tmp.path().join("sub"));
        assert!(dir.file("sub").is_err());
        assert!(dir.dir("a.txt").is_err());
    }

    #[test]
    fn file_likes_in_pre_order() {
        let tmp = fixture();
        let dir = Directory::new(tmp.path()).unwrap();
        let paths = dir.file_likes().map(|e| e.path().to_path_buf()).to_list();
        assert_eq!(
            names(paths, tmp.path()),
            ["", "a.txt", "b.txt", "sub", "sub/c.txt", "sub/d.txt"]
        );
    }

    #[test]
    fn files_only() {
        let tmp = fixture();
        let dir = Directory::new(tmp.path()).unwrap();
        let paths = dir.files().map_path().to_list();
        assert_eq!(
            names(paths, tmp.path()),
            ["a.txt", "b.txt", "sub/c.txt", "sub/d.txt"]
        );
    }

    #[test]
    fn dirs_only() {
        let tmp = fixture();
        let dir = Directory::new(tmp.path()).unwrap();
        let paths = dir.dirs().map(|d| d.path().to_path_buf()).to_list();
        assert_eq!(names(paths, tmp.path()), ["", "sub"]);
    }

    #[test]
    fn display() {
        let tmp = fixture();
        let dir = Directory::new(tmp.path()).unwrap();
        assert_eq!(dir.to_string(), format!("Dir(\"{}\")", tmp.path().display()));
    }
}

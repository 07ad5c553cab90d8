use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use super::{Directory, Location, TextFile, located};
use crate::{
    Expansion, FileKind, FileLike, FileSize, FsError, TextEncoding, encoding_for_label,
};

/// A regular file on disk. A symbolic link to a file is not a `RegularFile`.
///
/// Every accessor reads fresh metadata or content; nothing is cached.
#[derive(Debug, Clone)]
pub struct RegularFile {
    location: Location,
}

located!(RegularFile, FileKind::File);

impl RegularFile {
    /// Open the regular file at `path`, resolved with [`Expansion::ALL`].
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no regular file at the resolved path
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        Self::with_expansion(path, Expansion::ALL)
    }

    /// Open the regular file at `path`, resolved with `expansion`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no regular file at the resolved path
    pub fn with_expansion(path: impl AsRef<Path>, expansion: Expansion) -> Result<Self, FsError> {
        Location::resolve(path, expansion, FileKind::File).map(Self::from_location)
    }

    pub(crate) fn from_location(location: Location) -> Self {
        Self { location }
    }

    /// Whole content of the file.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the file cannot be read
    pub fn bytes(&self) -> Result<Vec<u8>, FsError> {
        fs::read(self.path()).map_err(|e| FsError::io("read", self.path(), e))
    }

    /// Size of the file in bytes, like `wc -c`.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the metadata cannot be read
    pub fn byte_count(&self) -> Result<u64, FsError> {
        Ok(self.metadata()?.len())
    }

    /// Size of the file.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the metadata cannot be read
    pub fn size(&self) -> Result<FileSize, FsError> {
        self.byte_count().map(FileSize::from_bytes)
    }

    /// Extension without the leading dot, or an empty string if there is none.
    ///
    /// A leading dot does not start an extension: `.bashrc` has none.
    pub fn extension(&self) -> String {
        self.path()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Time of the last access.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the metadata cannot be read or the platform has no access time
    pub fn access_time(&self) -> Result<SystemTime, FsError> {
        self.metadata()?
            .accessed()
            .map_err(|e| FsError::io("access time", self.path(), e))
    }

    /// Time of the last modification.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the metadata cannot be read or the platform has no modification time
    pub fn mod_time(&self) -> Result<SystemTime, FsError> {
        self.metadata()?
            .modified()
            .map_err(|e| FsError::io("modification time", self.path(), e))
    }

    /// The directory containing this file.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the directory was removed in the meantime
    pub fn dir(&self) -> Result<Directory, FsError> {
        let parent = self.path().parent().unwrap_or(self.path());
        Directory::with_expansion(parent, Expansion::NONE)
    }

    /// This file read as UTF-8 text, failing on undecodable content.
    pub fn text(&self) -> TextFile {
        TextFile::from_file(self.clone(), TextEncoding::UTF_8, true)
    }

    /// This file read as text in the encoding named by `label`.
    ///
    /// With `raise_on_decode_error` unset, undecodable content reads as empty.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnknownEncoding`] if `label` names no known encoding
    pub fn text_file(&self, label: &str, raise_on_decode_error: bool) -> Result<TextFile, FsError> {
        let encoding = encoding_for_label(label)?;
        Ok(TextFile::from_file(self.clone(), encoding, raise_on_decode_error))
    }

    fn metadata(&self) -> Result<fs::Metadata, FsError> {
        fs::metadata(self.path()).map_err(|e| FsError::io("metadata", self.path(), e))
    }
}

impl AsRef<RegularFile> for RegularFile {
    fn as_ref(&self) -> &RegularFile {
        self
    }
}

impl fmt::Display for RegularFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File(\"{}\")", self.path().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileSizeUnit;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "line 1").unwrap();
        fs::write(tmp.path().join("emptybin"), "").unwrap();
        fs::write(tmp.path().join("archive.tar.gz"), [0u8; 1500]).unwrap();
        fs::write(tmp.path().join(".hidden"), "x").unwrap();
        fs::create_dir(tmp.path().join("sub_dir")).unwrap();
        tmp
    }

    #[test]
    fn missing_file() {
        let tmp = fixture();
        let err = RegularFile::new(tmp.path().join("f.txt")).unwrap_err();
        assert!(matches!(
            err,
            FsError::NotFound {
                kind: FileKind::File,
                ..
            }
        ));
        assert!(RegularFile::new(tmp.path().join("sub_dir")).is_err());
    }

    #[test]
    fn content_and_counts() {
        let tmp = fixture();
        let file = RegularFile::new(tmp.path().join("a.txt")).unwrap();
        assert_eq!(file.bytes().unwrap(), b"line 1");
        assert_eq!(file.byte_count().unwrap(), 6);
        assert_eq!(file.size().unwrap(), FileSize::from_bytes(6));

        let empty = RegularFile::new(tmp.path().join("emptybin")).unwrap();
        assert!(empty.bytes().unwrap().is_empty());
        assert_eq!(empty.byte_count().unwrap(), 0);
    }

    #[test]
    fn size_picks_a_unit() {
        let tmp = fixture();
        let file = RegularFile::new(tmp.path().join("archive.tar.gz")).unwrap();
        let size = file.size().unwrap();
        assert_eq!(size.unit(), FileSizeUnit::Kb);
        assert_eq!(size.to_string(), "1.5KB");
    }

    #[test]
    fn extensions() {
        let tmp = fixture();
        let ext = |name: &str| RegularFile::new(tmp.path().join(name)).unwrap().extension();
        assert_eq!(ext("a.txt"), "txt");
        assert_eq!(ext("archive.tar.gz"), "gz");
        assert_eq!(ext("emptybin"), "");
        assert_eq!(ext(".hidden"), "");
    }

    #[test]
    fn timestamps() {
        let tmp = fixture();
        let file = RegularFile::new(tmp.path().join("a.txt")).unwrap();
        let modified = file.mod_time().unwrap();
        assert!(modified <= SystemTime::now());
        assert!(file.access_time().is_ok());
    }

    #[test]
    fn containing_dir() {
        let tmp = fixture();
        let file = RegularFile::new(tmp.path().join("a.txt")).unwrap();
        assert_eq!(file.dir().unwrap().path(), tmp.path());
    }

    #[test]
    fn text_views() {
        let tmp = fixture();
        let file = RegularFile::new(tmp.path().join("a.txt")).unwrap();
        assert_eq!(file.text().content().unwrap(), "line 1");

        let latin = file.text_file("latin1", false).unwrap();
        assert_eq!(latin.encoding(), TextEncoding::Latin1);
        assert_eq!(file.text().encoding(), TextEncoding::UTF_8);
        assert!(!latin.raise_on_decode_error());

        assert!(matches!(
            file.text_file("klingon", true),
            Err(FsError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn read_errors_name_the_file() {
        let tmp = fixture();
        let path = tmp.path().join("a.txt");
        let file = RegularFile::new(&path).unwrap();
        fs::remove_file(&path).unwrap();

        match file.bytes() {
            Err(FsError::Io { path: failed, source, .. }) => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
        assert!(matches!(file.byte_count(), Err(FsError::Io { .. })));
    }

    #[test]
    fn display() {
        let tmp = fixture();
        let file = RegularFile::new(tmp.path().join("a.txt")).unwrap();
        assert_eq!(
            file.to_string(),
            format!("File(\"{}\")", tmp.path().join("a.txt").display())
        );
    }
}

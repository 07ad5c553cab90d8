use std::fmt;
use std::path::Path;

use tracing::debug;

use super::RegularFile;
use crate::text::{TextEncoding, decode_text, split_lines};
use crate::{FileKind, FileLike, Fluent, FsError, FunctionalIterator, is_blank};

/// A regular file read as text.
///
/// Content is decoded with the configured encoding on every access, and
/// `\r\n` and lone `\r` are read as `\n`. When decoding fails the content
/// either raises [`FsError::Decode`] or, with `raise_on_decode_error` unset,
/// reads as empty: an empty string, no lines, no words.
#[derive(Debug, Clone)]
pub struct TextFile {
    file: RegularFile,
    encoding: TextEncoding,
    raise_on_decode_error: bool,
}

impl TextFile {
    /// Open the regular file at `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no regular file at the resolved path
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        Ok(RegularFile::new(path)?.text())
    }

    /// Open the regular file at `path` as text in the encoding named by `label`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if there is no regular file at the resolved path
    /// - [`FsError::UnknownEncoding`] if `label` names no known encoding
    pub fn with_encoding(
        path: impl AsRef<Path>,
        label: &str,
        raise_on_decode_error: bool,
    ) -> Result<Self, FsError> {
        RegularFile::new(path)?.text_file(label, raise_on_decode_error)
    }

    /// View `file` as text.
    pub fn from_file(
        file: RegularFile,
        encoding: TextEncoding,
        raise_on_decode_error: bool,
    ) -> Self {
        Self {
            file,
            encoding,
            raise_on_decode_error,
        }
    }

    /// The underlying regular file.
    pub fn file(&self) -> &RegularFile {
        &self.file
    }

    /// Encoding used to decode the content.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Whether undecodable content is an error rather than empty.
    pub fn raise_on_decode_error(&self) -> bool {
        self.raise_on_decode_error
    }

    /// Decoded content of the file.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the file cannot be read
    /// - [`FsError::Decode`] if decoding fails and `raise_on_decode_error` is set
    pub fn content(&self) -> Result<String, FsError> {
        let bytes = self.file.bytes()?;
        match decode_text(&bytes, self.encoding) {
            Some(text) => Ok(text),
            None if self.raise_on_decode_error => Err(FsError::Decode {
                path: self.path().to_path_buf(),
                encoding: self.encoding.name(),
            }),
            None => {
                debug!(
                    path = %self.path().display(),
                    encoding = self.encoding.name(),
                    "undecodable content read as empty"
                );
                Ok(String::new())
            }
        }
    }

    /// Number of characters, like `wc -m`.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn char_count(&self) -> Result<usize, FsError> {
        Ok(self.content()?.chars().count())
    }

    /// Whitespace-separated words.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn words(&self) -> Result<FunctionalIterator<'static, String>, FsError> {
        let words: Vec<String> = self
            .content()?
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        Ok(FunctionalIterator::new(words))
    }

    /// Number of words, like `wc -w`.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn word_count(&self) -> Result<usize, FsError> {
        Ok(self.words()?.len())
    }

    /// Lines without their terminators.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn lines(&self) -> Result<FunctionalIterator<'static, String>, FsError> {
        Ok(FunctionalIterator::new(split_lines(&self.content()?)))
    }

    /// Number of lines. A last line without a newline still counts.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn line_count(&self) -> Result<usize, FsError> {
        Ok(self.lines()?.len())
    }

    /// Length of every line, in characters.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn line_lens(&self) -> Result<FunctionalIterator<'static, usize>, FsError> {
        Ok(self.lines()?.map(|line| line.chars().count()))
    }

    /// Length of the longest line, like `wc -L`; `None` for a file without lines.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn max_line_len(&self) -> Result<Option<usize>, FsError> {
        Ok(self.line_lens()?.max())
    }

    /// Lines that are empty or whitespace only.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn empty_lines(&self) -> Result<FunctionalIterator<'static, String>, FsError> {
        Ok(self.lines()?.filter(|line| is_blank(line)))
    }

    /// Number of [`empty_lines`](Self::empty_lines).
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn empty_line_count(&self) -> Result<usize, FsError> {
        Ok(self.empty_lines()?.len())
    }

    /// Lines with at least one non-whitespace character.
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn non_empty_lines(&self) -> Result<FunctionalIterator<'static, String>, FsError> {
        Ok(self.lines()?.filter(|line| !is_blank(line)))
    }

    /// Number of [`non_empty_lines`](Self::non_empty_lines).
    ///
    /// # Errors
    ///
    /// Same as [`content`](Self::content).
    pub fn non_empty_line_count(&self) -> Result<usize, FsError> {
        Ok(self.non_empty_lines()?.len())
    }
}

impl FileLike for TextFile {
    fn path(&self) -> &Path {
        self.file.path()
    }

    fn given_path(&self) -> &Path {
        self.file.given_path()
    }

    fn kind(&self) -> FileKind {
        FileKind::File
    }
}

impl AsRef<RegularFile> for TextFile {
    fn as_ref(&self) -> &RegularFile {
        &self.file
    }
}

impl From<TextFile> for RegularFile {
    fn from(text: TextFile) -> Self {
        text.file
    }
}

impl fmt::Display for TextFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextFile({})", self.path().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.txt"), "line 1").unwrap();
        fs::write(root.join("b.txt"), "line 2\nline 3\n").unwrap();
        fs::write(root.join("emptylines.txt"), "\n  \nword\n\t\n").unwrap();
        fs::write(root.join("crlf.txt"), "one\r\ntwo\rthree").unwrap();
        fs::write(root.join("empty.txt"), "").unwrap();
        fs::write(root.join("noenc.txt"), [0x66, 0x6f, 0x6f, 0xff, 0xfe, 0x0a]).unwrap();
        tmp
    }

    fn text(tmp: &TempDir, name: &str) -> TextFile {
        TextFile::new(tmp.path().join(name)).unwrap()
    }

    #[test]
    fn content_and_counts() {
        let tmp = fixture();
        let a = text(&tmp, "a.txt");
        assert_eq!(a.content().unwrap(), "line 1");
        assert_eq!(a.char_count().unwrap(), 6);
        assert_eq!(a.word_count().unwrap(), 2);
        assert_eq!(a.line_count().unwrap(), 1);
        assert_eq!(a.max_line_len().unwrap(), Some(6));
    }

    #[test]
    fn lines_drop_terminators() {
        let tmp = fixture();
        let b = text(&tmp, "b.txt");
        assert_eq!(b.lines().unwrap().to_list(), ["line 2", "line 3"]);
        assert_eq!(b.line_lens().unwrap().to_list(), [6, 6]);
        assert_eq!(b.words().unwrap().to_list(), ["line", "2", "line", "3"]);
    }

    #[test]
    fn universal_newlines() {
        let tmp = fixture();
        let crlf = text(&tmp, "crlf.txt");
        assert_eq!(crlf.content().unwrap(), "one\ntwo\nthree");
        assert_eq!(crlf.lines().unwrap().to_list(), ["one", "two", "three"]);
    }

    #[test]
    fn blank_lines() {
        let tmp = fixture();
        let file = text(&tmp, "emptylines.txt");
        assert_eq!(file.line_count().unwrap(), 4);
        assert_eq!(file.empty_line_count().unwrap(), 3);
        assert_eq!(file.non_empty_lines().unwrap().to_list(), ["word"]);
        assert_eq!(file.non_empty_line_count().unwrap(), 1);
    }

    #[test]
    fn empty_file() {
        let tmp = fixture();
        let empty = text(&tmp, "empty.txt");
        assert_eq!(empty.line_count().unwrap(), 0);
        assert_eq!(empty.max_line_len().unwrap(), None);
        assert_eq!(empty.word_count().unwrap(), 0);
    }

    #[test]
    fn decode_error_raises_by_default() {
        let tmp = fixture();
        let bad = text(&tmp, "noenc.txt");
        assert!(matches!(
            bad.content(),
            Err(FsError::Decode {
                encoding: "UTF-8",
                ..
            })
        ));
        assert!(bad.lines().is_err());
        assert!(bad.line_count().is_err());
    }

    #[test]
    fn decode_error_reads_as_empty_when_allowed() {
        let tmp = fixture();
        let bad = TextFile::with_encoding(tmp.path().join("noenc.txt"), "utf-8", false).unwrap();
        assert_eq!(bad.content().unwrap(), "");
        assert!(bad.lines().unwrap().to_list().is_empty());
        assert_eq!(bad.word_count().unwrap(), 0);
    }

    #[test]
    fn other_encodings() {
        let tmp = fixture();
        let latin = TextFile::with_encoding(tmp.path().join("noenc.txt"), "latin1", true).unwrap();
        assert_eq!(latin.char_count().unwrap(), 6);
        assert_eq!(latin.line_count().unwrap(), 1);
    }

    #[test]
    fn ascii_is_strict() {
        let tmp = fixture();
        let path = tmp.path().join("cafe.txt");
        fs::write(&path, "café\n").unwrap();

        let strict = TextFile::with_encoding(&path, "ascii", true).unwrap();
        assert_eq!(strict.encoding(), TextEncoding::Ascii);
        assert!(matches!(
            strict.content(),
            Err(FsError::Decode {
                encoding: "ASCII",
                ..
            })
        ));

        let lenient = TextFile::with_encoding(&path, "us-ascii", false).unwrap();
        assert_eq!(lenient.content().unwrap(), "");

        let plain = TextFile::with_encoding(tmp.path().join("a.txt"), "ascii", true).unwrap();
        assert_eq!(plain.content().unwrap(), "line 1");
    }

    #[test]
    fn iso_8859_1_maps_bytes_to_code_points() {
        let tmp = fixture();
        let path = tmp.path().join("latin.txt");
        fs::write(&path, [0x63, 0x61, 0x66, 0xe9, 0x80, 0x0a]).unwrap();
        let latin = TextFile::with_encoding(&path, "iso-8859-1", true).unwrap();
        assert_eq!(latin.content().unwrap(), "caf\u{e9}\u{80}\n");
    }

    #[test]
    fn is_still_a_file() {
        let tmp = fixture();
        let a = text(&tmp, "a.txt");
        assert_eq!(a.kind(), FileKind::File);
        assert_eq!(a.file().byte_count().unwrap(), 6);
        assert_eq!(RegularFile::from(a.clone()), a);
        assert_eq!(
            a.to_string(),
            format!("TextFile({})", tmp.path().join("a.txt").display())
        );
    }
}

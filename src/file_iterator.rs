//! # File Iterators
//!
//! [`FileIterator`] is a [`Fluent`] sequence of files with query-specific
//! filters and projections on top. Filters keep the iterator type, so they
//! chain freely with `filter`, `sort_*` and each other:
//!
//! ```rust,no_run
//! use fluentfs::{Directory, Fluent};
//!
//! let line_count: usize = Directory::new("~/project")?
//!     .files()
//!     .filter_not_base_path("~/project/target")?
//!     .filter_extension("rs")
//!     .text_files()
//!     .map_line_count()
//!     .sum::<Result<usize, _>>()?;
//! # Ok::<(), fluentfs::FsError>(())
//! ```
//!
//! ## Filter families
//!
//! | Family | Matches | Against |
//! |--------|---------|---------|
//! | extension | exact, case-sensitive, no dot | file extension |
//! | base path | component-wise ancestry | resolved path |
//! | glob | shell glob, `*` crosses `/` | path as given |
//! | name / path regex | full match, any pattern | file name / resolved path |
//!
//! Each pattern family comes as `filter_*` (keep matches), `filter_not_*`
//! (drop matches) and `include_or_exclude_*` (choose with a flag).

use std::collections::HashSet;
use std::path::PathBuf;

use crate::functional::Source;
use crate::matches::{compile_globs, is_within};
use crate::{
    Expansion, FileLike, Fluent, FsError, FunctionalIterator, PathList, Patterns, RegexList,
    RegularFile, TextFile, encoding_for_label, expand_paths, matches_compiled_regex,
};

/// Lazy sequence of files.
///
/// `F` is [`RegularFile`] for plain walks and [`TextFile`] after
/// [`text_files`](Self::text_files).
pub struct FileIterator<'a, F = RegularFile> {
    inner: FunctionalIterator<'a, F>,
}

/// Lazy sequence of text files.
pub type TextFileIterator<'a> = FileIterator<'a, TextFile>;

impl<'a, F: 'a> FileIterator<'a, F> {
    /// Wrap a source of files. Nothing is pulled until a terminal operation runs.
    pub fn new<I>(files: I) -> Self
    where
        I: IntoIterator<Item = F>,
        I::IntoIter: 'a,
    {
        Self {
            inner: FunctionalIterator::new(files),
        }
    }
}

impl<'a, F: 'a> Fluent<'a> for FileIterator<'a, F> {
    type Item = F;

    fn from_source(source: Source<'a, F>) -> Self {
        Self {
            inner: FunctionalIterator::from_source(source),
        }
    }

    fn into_source(self) -> Source<'a, F> {
        self.inner.into_source()
    }
}

impl<'a, F: 'a> IntoIterator for FileIterator<'a, F> {
    type Item = F;
    type IntoIter = Source<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_source()
    }
}

impl<F> std::fmt::Debug for FileIterator<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileIterator").finish_non_exhaustive()
    }
}

impl<'a, F> FileIterator<'a, F>
where
    F: FileLike + AsRef<RegularFile> + 'a,
{
    /// Keep the files for which `matches` equals `include`.
    fn retain_if<P>(self, include: bool, mut matches: P) -> Self
    where
        P: FnMut(&F) -> bool + 'a,
    {
        self.filter(move |file| matches(file) == include)
    }

    // Extensions

    /// Keep files whose extension is exactly `extension` (no leading dot).
    pub fn filter_extension(self, extension: &str) -> Self {
        let extension = extension.to_owned();
        self.filter(move |file| file.as_ref().extension() == extension)
    }

    /// Keep files whose extension is one of `extensions`.
    pub fn filter_extensions(self, extensions: impl Patterns) -> Self {
        let extensions: HashSet<String> = extensions.into_patterns().into_iter().collect();
        self.filter(move |file| extensions.contains(&file.as_ref().extension()))
    }

    // Base paths

    /// Keep files inside any of `base_paths`.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if a relative base path needs the unavailable working directory
    pub fn filter_base_path(self, base_paths: impl PathList) -> Result<Self, FsError> {
        self.include_or_exclude_base_path(base_paths, true)
    }

    /// Drop files inside any of `base_paths`.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if a relative base path needs the unavailable working directory
    pub fn filter_not_base_path(self, base_paths: impl PathList) -> Result<Self, FsError> {
        self.include_or_exclude_base_path(base_paths, false)
    }

    /// Keep (`include`) or drop files inside any of `base_paths`.
    ///
    /// Base paths are resolved with [`Expansion::ALL`] once, up front.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if a relative base path needs the unavailable working directory
    pub fn include_or_exclude_base_path(
        self,
        base_paths: impl PathList,
        include: bool,
    ) -> Result<Self, FsError> {
        let base_paths = expand_paths(base_paths.into_paths(), Expansion::ALL)?;
        Ok(self.retain_if(include, move |file| is_within(file.path(), &base_paths)))
    }

    // Globs

    /// Keep files whose given path matches any glob.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if a glob does not compile
    pub fn filter_glob(self, globs: impl Patterns) -> Result<Self, FsError> {
        self.include_or_exclude_glob(globs, true)
    }

    /// Drop files whose given path matches any glob.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if a glob does not compile
    pub fn filter_not_glob(self, globs: impl Patterns) -> Result<Self, FsError> {
        self.include_or_exclude_glob(globs, false)
    }

    /// Keep (`include`) or drop files whose given path matches any glob.
    ///
    /// Globs see the path as it was given, not resolved, so `src/*.rs`
    /// matches files reached through a relative directory `src`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if a glob does not compile
    pub fn include_or_exclude_glob(self, globs: impl Patterns, include: bool) -> Result<Self, FsError> {
        let globs = compile_globs(&globs.into_patterns())?;
        Ok(self.retain_if(include, move |file| globs.is_match(file.given_path())))
    }

    // Regular expressions

    /// Keep files whose name fully matches any expression.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    pub fn filter_name_regex(self, regex: impl RegexList) -> Result<Self, FsError> {
        self.include_or_exclude_name_regex(regex, true)
    }

    /// Drop files whose name fully matches any expression.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    pub fn filter_not_name_regex(self, regex: impl RegexList) -> Result<Self, FsError> {
        self.include_or_exclude_name_regex(regex, false)
    }

    /// Keep (`include`) or drop files whose name fully matches any expression.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    pub fn include_or_exclude_name_regex(
        self,
        regex: impl RegexList,
        include: bool,
    ) -> Result<Self, FsError> {
        let regexes = regex.into_regexes()?;
        Ok(self.retain_if(include, move |file| {
            matches_compiled_regex(&file.name(), &regexes)
        }))
    }

    /// Keep files whose resolved path fully matches any expression.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    pub fn filter_path_regex(self, regex: impl RegexList) -> Result<Self, FsError> {
        self.include_or_exclude_path_regex(regex, true)
    }

    /// Drop files whose resolved path fully matches any expression.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    pub fn filter_not_path_regex(self, regex: impl RegexList) -> Result<Self, FsError> {
        self.include_or_exclude_path_regex(regex, false)
    }

    /// Keep (`include`) or drop files whose resolved path fully matches any expression.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    pub fn include_or_exclude_path_regex(
        self,
        regex: impl RegexList,
        include: bool,
    ) -> Result<Self, FsError> {
        let regexes = regex.into_regexes()?;
        Ok(self.retain_if(include, move |file| {
            matches_compiled_regex(&file.path().to_string_lossy(), &regexes)
        }))
    }

    // Projections

    /// Resolved path of every file.
    pub fn map_path(self) -> FunctionalIterator<'a, PathBuf> {
        self.map_to_base(|file| file.path().to_path_buf())
    }

    /// Name of every file.
    pub fn map_name(self) -> FunctionalIterator<'a, String> {
        self.map_to_base(|file| file.name())
    }

    /// Byte count of every file.
    pub fn map_byte_count(self) -> FunctionalIterator<'a, Result<u64, FsError>> {
        self.map_to_base(|file| file.as_ref().byte_count())
    }

    /// Every file read as UTF-8 text, failing on undecodable content.
    pub fn text_files(self) -> TextFileIterator<'a> {
        FileIterator::new(self.into_source().map(|file| file.as_ref().text()))
    }

    /// Every file read as text in the encoding named by `label`.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnknownEncoding`] if `label` names no known encoding
    pub fn text_files_with(
        self,
        label: &str,
        raise_on_decode_error: bool,
    ) -> Result<TextFileIterator<'a>, FsError> {
        let encoding = encoding_for_label(label)?;
        Ok(FileIterator::new(self.into_source().map(move |file| {
            TextFile::from_file(file.as_ref().clone(), encoding, raise_on_decode_error)
        })))
    }
}

/// Text statistics, one value per file.
///
/// Each file is read afresh; a read or decode failure becomes that file's
/// `Err`. Summing into `Result<usize, FsError>` stops at the first one.
impl<'a> TextFileIterator<'a> {
    /// Character count of every file.
    pub fn map_char_count(self) -> FunctionalIterator<'a, Result<usize, FsError>> {
        self.map_to_base(|file| file.char_count())
    }

    /// Word count of every file.
    pub fn map_word_count(self) -> FunctionalIterator<'a, Result<usize, FsError>> {
        self.map_to_base(|file| file.word_count())
    }

    /// Line count of every file.
    pub fn map_line_count(self) -> FunctionalIterator<'a, Result<usize, FsError>> {
        self.map_to_base(|file| file.line_count())
    }

    /// Number of blank lines of every file.
    pub fn map_empty_line_count(self) -> FunctionalIterator<'a, Result<usize, FsError>> {
        self.map_to_base(|file| file.empty_line_count())
    }

    /// Number of non-blank lines of every file.
    pub fn map_non_empty_line_count(self) -> FunctionalIterator<'a, Result<usize, FsError>> {
        self.map_to_base(|file| file.non_empty_line_count())
    }
}
